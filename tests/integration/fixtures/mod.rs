// Page texts and lexicons with known filtering outcomes
#![allow(dead_code)]

/// Short block with a quote, kept whole at the default threshold
pub const SHORT_QUOTED: &str = "Hello \"world\"! Next.";

/// Long block mixing plain prose, a quoted ad and Korean text
pub const LONG_MIXED: &str = "The morning market opened early and the stalls filled quickly with fruit. \
A vendor shouted \"Buy now, discount today!\" across the square. \
Children ran between the carts while their parents bargained. \
그가 “멈춰.” 라고 말했다. 그리고 모두 조용해졌다.";

/// Lexicon used by CLI and pipeline tests
pub const LEXICON_JSON: &str = r#"{
    "AD": ["buy now", "discount", "free shipping"],
    "SE": ["explicit"],
    "VI": ["attack", "weapon"]
}"#;

/// Request where only the advertising element should survive
pub const PAGE_REQUEST_JSON: &str = r#"{
    "pageUrl": "https://example.com/market",
    "textElements": [
        {"elementId": "banner", "texts": [{"text": "Free shipping! Buy now."}]},
        {"elementId": "story", "texts": [{"text": "A calm walk through the park."}]},
        {"elementId": "footer", "texts": [{"text": "Explicit material below."}]}
    ],
    "activeCategories": {"AD": true, "SE": false}
}"#;
