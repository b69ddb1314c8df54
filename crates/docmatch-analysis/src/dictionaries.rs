//! Word lists driving the rule-based tier.
//!
//! Task descriptions arrive in Turkish, English, or a mix of both, so
//! every list carries both languages.

use docmatch_core::features::Intent;

/// Common Turkish filler words excluded from keywords.
pub const STOP_WORDS: &[&str] = &[
    "bir", "bu", "şu", "ve", "veya", "ile", "için", "gibi", "kadar", "daha", "çok", "az", "en",
    "da", "de", "ki", "mi", "mı", "mu", "mü", "ne", "nasıl", "neden", "niçin", "nerede", "hangi",
];

/// Intent markers, checked as substrings of the lowercased text.
pub const INTENT_KEYWORDS: &[(Intent, &[&str])] = &[
    (
        Intent::AddFeature,
        &[
            "ekle", "ekleme", "yeni", "oluştur", "implement", "add", "geliştir", "entegre",
            "dahil et", "koy",
        ],
    ),
    (
        Intent::UpdateFeature,
        &[
            "güncelle", "değiştir", "iyileştir", "revize", "update", "düzenle", "modifiye",
            "optimize", "geliştir",
        ],
    ),
    (
        Intent::FixBug,
        &[
            "düzelt", "fix", "hata", "bug", "sorun", "problem", "çözüm", "tamir", "repair",
        ],
    ),
    (
        Intent::Refactor,
        &["kaldır", "sil", "çıkar", "remove", "delete", "temizle", "refactor", "cleanup"],
    ),
];

/// Domain vocabulary used for entity extraction and complexity scoring.
pub const TECHNICAL_TERMS: &[&str] = &[
    // Authentication
    "authentication",
    "login",
    "logout",
    "password",
    "token",
    "oauth",
    "biometric",
    "face id",
    "touch id",
    "kimlik doğrulama",
    "şifre",
    // UI
    "button",
    "buton",
    "form",
    "input",
    "ekran",
    "screen",
    "modal",
    "dialog",
    "menu",
    "navigation",
    "navigasyon",
    // Data
    "database",
    "veritabanı",
    "api",
    "endpoint",
    "request",
    "response",
    "json",
    "xml",
    "query",
    "sorgu",
    // Mobile
    "mobile",
    "mobil",
    "android",
    "ios",
    "app",
    "uygulama",
    // Payment
    "payment",
    "ödeme",
    "transaction",
    "işlem",
    "transfer",
    "wallet",
];

/// Vague qualifiers that make a request harder to pin down.
pub const AMBIGUOUS_WORDS: &[&str] = &[
    "optimize",
    "improve",
    "better",
    "good",
    "bad",
    "slow",
    "fast",
    "iyileştir",
    "optimize et",
    "daha iyi",
    "iyi",
    "kötü",
    "yavaş",
    "hızlı",
    "maybe",
    "belki",
    "veya",
    "ya da",
    "mümkünse",
    "tercihen",
];

pub const CONDITIONAL_WORDS: &[&str] = &["if", "eğer", "when", "ne zaman", "depending", "bağlı olarak"];

pub const NEGATION_WORDS: &[&str] = &["not", "no", "değil", "yok", "olmadan", "without"];

/// Keywords that shift relevance toward test-case documents.
pub const TEST_KEYWORDS: &[&str] = &["test", "testleme", "senaryo", "scenario", "case"];

/// Keywords that shift relevance toward technical-design documents.
pub const TECH_RELEVANCE_KEYWORDS: &[&str] = &["api", "endpoint", "database", "backend", "architecture"];
