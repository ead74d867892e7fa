//! Client-side behavior shipped as `js/main.js`.
//!
//! The script is identical for every site; only the stylesheet varies.

/// Sidebar toggle, image-error fallback, slider navigation and fullscreen toggle.
pub const MAIN_JS: &str = r#"(function () {
    'use strict';

    function initSidebar() {
        var toggle = document.querySelector('.sidebar-toggle');
        var sidebar = document.getElementById('sidebar');
        var overlay = document.querySelector('.sidebar-overlay');
        if (!toggle || !sidebar) return;

        function setOpen(open) {
            sidebar.classList.toggle('open', open);
            document.body.classList.toggle('sidebar-open', open);
            if (overlay) overlay.classList.toggle('visible', open);
            toggle.setAttribute('aria-expanded', open ? 'true' : 'false');
        }

        toggle.addEventListener('click', function () {
            setOpen(!sidebar.classList.contains('open'));
        });
        if (overlay) {
            overlay.addEventListener('click', function () { setOpen(false); });
        }
        document.addEventListener('keydown', function (e) {
            if (e.key === 'Escape') setOpen(false);
        });
    }

    function initImageFallback() {
        document.querySelectorAll('img[data-fallback]').forEach(function (img) {
            function fallback() {
                img.removeAttribute('data-fallback');
                img.classList.add('img-fallback');
                img.removeAttribute('src');
                img.setAttribute('alt', img.getAttribute('alt') || '');
            }
            if (img.complete && img.naturalWidth === 0 && img.getAttribute('src')) {
                fallback();
            } else {
                img.addEventListener('error', fallback, { once: true });
            }
        });
    }

    function initSliders() {
        document.querySelectorAll('[data-slider]').forEach(function (slider) {
            var track = slider.querySelector('.slider-track');
            var prev = slider.querySelector('.slider-prev');
            var next = slider.querySelector('.slider-next');
            if (!track) return;

            function step() {
                var card = track.firstElementChild;
                return card ? card.getBoundingClientRect().width + 24 : track.clientWidth;
            }
            if (prev) {
                prev.addEventListener('click', function () {
                    track.scrollBy({ left: -step(), behavior: 'smooth' });
                });
            }
            if (next) {
                next.addEventListener('click', function () {
                    track.scrollBy({ left: step(), behavior: 'smooth' });
                });
            }
        });
    }

    function initFullscreen() {
        document.querySelectorAll('[data-fullscreen-target]').forEach(function (button) {
            var target = document.getElementById(button.getAttribute('data-fullscreen-target'));
            if (!target) return;

            button.addEventListener('click', function () {
                if (document.fullscreenElement) {
                    document.exitFullscreen();
                } else if (target.requestFullscreen) {
                    target.requestFullscreen();
                } else if (target.webkitRequestFullscreen) {
                    target.webkitRequestFullscreen();
                }
            });
            document.addEventListener('fullscreenchange', function () {
                button.textContent = document.fullscreenElement ? 'Exit Fullscreen' : 'Fullscreen';
            });
        });
    }

    document.addEventListener('DOMContentLoaded', function () {
        initSidebar();
        initImageFallback();
        initSliders();
        initFullscreen();
    });
})();
"#;
