//! Header and footer markup generated from the site config.
//!
//! The output follows the markup contract the rest of the crate relies on:
//! `data-page` on every navigation link, the mobile toggle and panel
//! classes, and a close button inside the panel.

use crate::config::{NavigationEntry, SiteConfig, SocialLink};
use crate::utils::html::{escape, escape_attr};
use std::fmt::Write;

/// Legal links in the footer: `[links]` key and label.
const LEGAL_LINKS: [(&str, &str); 3] = [
    ("privacy_policy", "Privacy Policy"),
    ("terms_of_service", "Terms of Service"),
    ("return_policy", "Return Policy"),
];

const NEW_CONTEXT: &str = r#" target="_blank" rel="noopener noreferrer""#;

fn nav_link(out: &mut String, entry: &NavigationEntry, class: &str, indent: &str) {
    let _ = writeln!(
        out,
        r#"{indent}<a href="{}" class="{class}" data-page="{}"{}>{}</a>"#,
        escape_attr(&entry.url),
        escape_attr(&entry.slug),
        if entry.external { NEW_CONTEXT } else { "" },
        escape(&entry.name),
    );
}

/// Render `header.html`.
pub fn render_header(config: &SiteConfig) -> String {
    let name = escape(&config.site.name);
    let navigation = config.navigation();
    let mut out = String::new();

    out.push_str("<div class=\"container\">\n    <div class=\"header__content\">\n");
    let _ = writeln!(out, r#"        <a href="index.html" class="header__logo">{name}</a>"#);
    out.push_str(
        "        <nav class=\"header__nav\" role=\"navigation\" aria-label=\"Main navigation\">\n",
    );
    for entry in &navigation {
        nav_link(&mut out, entry, "header__nav-link", "            ");
    }
    out.push_str("        </nav>\n");
    out.push_str(concat!(
        "        <button class=\"header__mobile-toggle\" aria-label=\"Open mobile menu\" ",
        "aria-expanded=\"false\" aria-controls=\"mobile-nav\">\n",
        "            <span class=\"mobile-toggle__icon\">☰</span>\n",
        "        </button>\n",
        "    </div>\n",
        "    <div class=\"header__mobile-nav\" id=\"mobile-nav\" aria-hidden=\"true\">\n",
        "        <div class=\"header__mobile-nav-header\">\n",
    ));
    let _ = writeln!(out, r#"            <a href="index.html" class="header__logo">{name}</a>"#);
    out.push_str(concat!(
        "            <button class=\"header__mobile-nav-close\" aria-label=\"Close mobile menu\">×</button>\n",
        "        </div>\n",
        "        <nav role=\"navigation\" aria-label=\"Mobile navigation\">\n",
    ));
    for entry in &navigation {
        nav_link(&mut out, entry, "header__mobile-nav-link", "            ");
    }
    out.push_str("        </nav>\n    </div>\n</div>\n");
    out
}

fn social_link(out: &mut String, link: &SocialLink) {
    let _ = writeln!(
        out,
        r#"                <a href="{}" class="footer__social-link"{NEW_CONTEXT} aria-label="Visit our {}">{}</a>"#,
        escape_attr(&link.url),
        escape_attr(&link.display_name()),
        link.icon(),
    );
}

/// Render `footer.html`. `year` is used unless `site.copyright_year` is set.
pub fn render_footer(config: &SiteConfig, year: u16) -> String {
    let site = &config.site;
    let name = escape(&site.name);
    let year = site.copyright_year.unwrap_or(year);
    let mut out = String::new();

    out.push_str("<div class=\"container\">\n    <div class=\"footer__content\">\n");

    // About
    out.push_str("        <div class=\"footer__section\">\n");
    let _ = writeln!(out, r#"            <h3 class="footer__title">{name}</h3>"#);
    if !site.description.is_empty() {
        let _ = writeln!(
            out,
            r#"            <p class="footer__text">{}</p>"#,
            escape(&site.description)
        );
    }
    let social = config.social_links();
    if !social.is_empty() {
        out.push_str("            <div class=\"footer__social\">\n");
        for link in social {
            social_link(&mut out, link);
        }
        out.push_str("            </div>\n");
    }
    out.push_str("        </div>\n");

    // Quick links
    out.push_str(concat!(
        "        <div class=\"footer__section\">\n",
        "            <h3 class=\"footer__title\">Quick Links</h3>\n",
        "            <nav role=\"navigation\" aria-label=\"Footer navigation\">\n",
    ));
    for entry in config.navigation().iter().filter(|e| e.slug != crate::page::HOME) {
        let _ = writeln!(
            out,
            r#"                <a href="{}" class="footer__link"{}>{}</a>"#,
            escape_attr(&entry.url),
            if entry.external { NEW_CONTEXT } else { "" },
            escape(&entry.name),
        );
    }
    out.push_str("            </nav>\n        </div>\n");

    // Contact
    let email = config.contact.email.trim();
    let newsletter = config.is_feature_enabled("newsletter");
    if !email.is_empty() || newsletter {
        out.push_str(concat!(
            "        <div class=\"footer__section\">\n",
            "            <h3 class=\"footer__title\">Connect With Us</h3>\n",
        ));
        if !email.is_empty() {
            let _ = writeln!(
                out,
                r#"            <a href="mailto:{}" class="footer__link">{}</a>"#,
                escape_attr(email),
                escape(email)
            );
        }
        if newsletter {
            out.push_str(concat!(
                "            <div class=\"footer__newsletter-signup\">\n",
                "                <a href=\"#newsletter-signup\" class=\"btn btn--secondary btn--small\">Join Newsletter</a>\n",
                "            </div>\n",
            ));
        }
        out.push_str("        </div>\n");
    }

    out.push_str("    </div>\n    <div class=\"footer__bottom\">\n");
    let _ = writeln!(
        out,
        r#"        <p class="footer__copyright">© {year} {name}. All rights reserved.</p>"#
    );
    let legal: Vec<_> = LEGAL_LINKS
        .iter()
        .filter_map(|(key, label)| config.link(key).map(|url| (url, label)))
        .collect();
    if !legal.is_empty() {
        out.push_str(
            "        <nav class=\"footer__legal\" role=\"navigation\" aria-label=\"Legal links\">\n",
        );
        for (url, label) in legal {
            let _ = writeln!(
                out,
                r#"            <a href="{}" class="footer__legal-link">{label}</a>"#,
                escape_attr(url)
            );
        }
        out.push_str("        </nav>\n");
    }
    out.push_str("    </div>\n</div>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assemble::PageAssembler;
    use crate::config::test_parse_config;
    use crate::dom::Document;
    use crate::fragment::testing::MapSource;
    use crate::menu::MenuState;
    use crate::page::Page;
    use std::sync::Arc;

    const CONFIG: &str = r##"
[site]
name = "Three Arrows & Studio"
description = "Faith-based wall art."

[contact]
email = "hello@threearrowsstudio.com"

[links]
shop_url = "https://etsy.com/shop/threearrowsstudio"
privacy_policy = "/privacy-policy.html"

[features]
newsletter = true

[[navigation]]
name = "Home"
url = "index.html"

[[navigation]]
name = "About"
url = "about.html"

[[navigation]]
name = "Shop"
url = "#"
slug = "shop"
external = true
config_key = "shop_url"

[[social]]
platform = "instagram"
url = "https://instagram.com/threearrowsstudio"

[[social]]
platform = "tiktok"
url = ""
"##;

    #[test]
    fn test_header_links_carry_data_page() {
        let config = test_parse_config(CONFIG);
        let doc = Document::parse(&render_header(&config)).unwrap();
        let root = doc.root();

        let desktop = doc.query_class_all(root, "header__nav-link");
        let mobile = doc.query_class_all(root, "header__mobile-nav-link");
        assert_eq!(desktop.len(), 3);
        assert_eq!(mobile.len(), 3);

        let slugs: Vec<_> = desktop.iter().map(|&n| doc.attr(n, "data-page").unwrap()).collect();
        assert_eq!(slugs, vec!["home", "about", "shop"]);
        assert_eq!(doc.attr(desktop[2], "href"), Some("https://etsy.com/shop/threearrowsstudio"));
        assert_eq!(doc.attr(mobile[2], "target"), Some("_blank"));
        assert_eq!(doc.attr(mobile[1], "target"), None);

        let logo = doc.query_class(root, "header__logo").unwrap();
        assert_eq!(doc.text_content(logo), "Three Arrows & Studio");
    }

    #[test]
    fn test_footer_sections() {
        let config = test_parse_config(CONFIG);
        let html = render_footer(&config, 2026);
        let doc = Document::parse(&html).unwrap();
        let root = doc.root();

        assert_eq!(doc.query_class_all(root, "footer__social-link").len(), 1);
        // Home is left out of the quick links; the email is a footer link too.
        assert_eq!(doc.query_class_all(root, "footer__link").len(), 3);
        assert!(html.contains("#newsletter-signup"));
        assert!(html.contains("© 2026 Three Arrows &amp; Studio"));
        assert_eq!(doc.query_class_all(root, "footer__legal-link").len(), 1);
    }

    #[test]
    fn test_footer_copyright_year_and_flags() {
        let mut config = test_parse_config(CONFIG);
        config.site.copyright_year = Some(2025);
        config.features.insert("newsletter".into(), false);
        config.contact.email.clear();

        let html = render_footer(&config, 2026);
        assert!(html.contains("© 2025"));
        assert!(!html.contains("newsletter-signup"));
        assert!(!html.contains("Connect With Us"));
    }

    #[tokio::test]
    async fn test_rendered_fragments_assemble() {
        let config = Arc::new(test_parse_config(CONFIG));
        let source = MapSource::new()
            .with("header.html", &render_header(&config))
            .with("footer.html", &render_footer(&config, 2026));

        let mut page = Page::parse(
            r#"<body><header id="header"></header><footer id="footer"></footer></body>"#,
            "/about.html",
        )
        .unwrap();
        let assembly = PageAssembler::new(config)
            .assemble(&mut page, &source)
            .await
            .unwrap()
            .assembled()
            .unwrap();

        assert_eq!(assembly.activated, 2);
        let menu = assembly.menu.as_ref().unwrap();
        page.click(menu.controls().toggle);
        assert_eq!(menu.state(), MenuState::Open);
        page.click(menu.controls().close.unwrap());
        assert_eq!(menu.state(), MenuState::Closed);
    }
}
