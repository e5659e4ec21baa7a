//! Stylesheets injected at start-up

/// Document head access for injected `<style>` blocks
pub trait StyleHost {
    /// Insert a stylesheet under `id`. Inserting the same id twice is a no-op.
    fn inject_style(&self, id: &str, css: &str);
}

pub const RESPONSIVE_NAV_STYLE_ID: &str = "taskhero-responsive-nav";

pub const RESPONSIVE_NAV_CSS: &str = r#"
@media (max-width: 768px) {
    .hamburger.active span:nth-child(1) {
        transform: rotate(-45deg) translate(-5px, 6px);
    }
    .hamburger.active span:nth-child(2) {
        opacity: 0;
    }
    .hamburger.active span:nth-child(3) {
        transform: rotate(45deg) translate(-5px, -6px);
    }

    .nav-menu {
        position: fixed;
        left: -100%;
        top: 4rem;
        flex-direction: column;
        background-color: var(--bg-primary);
        width: 100%;
        text-align: center;
        transition: 0.3s;
        box-shadow: 0 10px 27px rgba(0, 0, 0, 0.05);
        border-top: 1px solid var(--border-light);
        padding: var(--spacing-lg) 0;
    }

    .nav-menu.active {
        left: 0;
    }

    .nav-links {
        flex-direction: column;
        gap: var(--spacing-lg);
        margin-bottom: var(--spacing-lg);
    }
}
"#;

pub const REVEAL_STYLE_ID: &str = "taskhero-scroll-reveal";

pub const REVEAL_CSS: &str = r#"
.feature-card,
.task-card,
.stat-card {
    opacity: 0;
    transform: translateY(20px);
    transition: opacity 0.6s ease-out, transform 0.6s ease-out;
}

.animate-in {
    opacity: 1 !important;
    transform: translateY(0) !important;
}

.feature-card:nth-child(even) {
    transition-delay: 0.1s;
}

.feature-card:nth-child(3n) {
    transition-delay: 0.2s;
}
"#;
