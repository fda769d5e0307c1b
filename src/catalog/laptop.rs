//! Laptop price-bracket catalog.
//!
//! Six price brackets, from entry level (under 500) to premium
//! workstations (2500 and above), estimated from 17 specifications. Two
//! specialised rules (gaming laptops, base MacBook Air) share their
//! category with a general rule and win it when they score higher.
//!
//! Prices are indicative only.
//!
//! # Examples
//!
//! ```
//! use u_infer::catalog::laptop::{self, attr};
//! use u_infer::facts::AttributeMap;
//! use u_infer::inference::InferenceEngine;
//!
//! let engine = InferenceEngine::with_defaults(laptop::rules().unwrap());
//! let facts = AttributeMap::new()
//!     .with(attr::CPU, "Intel Celeron / Pentium")
//!     .with(attr::RAM, "4 GB")
//!     .with(attr::GPU, "Integrated graphics (Intel UHD, AMD Radeon)");
//!
//! let best = engine.best(&facts).unwrap();
//! assert_eq!(best.category, laptop::ENTRY_LEVEL);
//! ```

use crate::error::RuleResult;
use crate::facts::Vocabulary;
use crate::rules::{Condition, Rule, RuleTable};

/// Attribute names.
pub mod attr {
    pub const SCREEN_SIZE: &str = "screen_size";
    pub const USAGE: &str = "usage";
    pub const CPU: &str = "cpu";
    pub const CPU_GENERATION: &str = "cpu_generation";
    pub const RAM: &str = "ram";
    pub const STORAGE: &str = "storage";
    pub const GPU: &str = "gpu";
    pub const DISPLAY: &str = "display";
    pub const REFRESH_RATE: &str = "refresh_rate";
    pub const BRAND: &str = "brand";
    pub const WEIGHT: &str = "weight";
    pub const NUMERIC_KEYPAD: &str = "numeric_keypad";
    pub const BACKLIT_KEYBOARD: &str = "backlit_keyboard";
    pub const RGB_KEYBOARD: &str = "rgb_keyboard";
    pub const THUNDERBOLT: &str = "thunderbolt";
    pub const HD_WEBCAM: &str = "hd_webcam";
    pub const FINGERPRINT_READER: &str = "fingerprint_reader";
}

pub const ENTRY_LEVEL: &str = "Entry level";
pub const BUDGET: &str = "Budget";
pub const VALUE: &str = "Value";
pub const UPPER_MID_RANGE: &str = "Upper mid-range";
pub const HIGH_END: &str = "High end / Creator";
pub const PREMIUM: &str = "Premium / Workstation";

// Option values referenced by the rules.

const OFFICE: &str = "Office";
const MULTIMEDIA: &str = "Multimedia";
const GAMING: &str = "Gaming";
const CREATION: &str = "Creation (video, 3D, photo)";
const PROFESSIONAL: &str = "Professional / Development";

const I3: &str = "Intel Core i3";
const I5: &str = "Intel Core i5";
const I7: &str = "Intel Core i7";
const I9: &str = "Intel Core i9";
const R3: &str = "AMD Ryzen 3";
const R5: &str = "AMD Ryzen 5";
const R7: &str = "AMD Ryzen 7";
const R9: &str = "AMD Ryzen 9";
const M1: &str = "Apple M1";
const M2: &str = "Apple M2";
const M3: &str = "Apple M3";
const M4: &str = "Apple M4";
const CELERON: &str = "Intel Celeron / Pentium";

const GEN_OLD: &str = "Older generation (before 2022)";
const GEN_RECENT: &str = "Recent generation (2022-2023)";
const GEN_LATEST: &str = "Latest generation (2024-2025)";

const RAM_4: &str = "4 GB";
const RAM_8: &str = "8 GB";
const RAM_16: &str = "16 GB";
const RAM_32: &str = "32 GB";
const RAM_64: &str = "64 GB or more";

const HDD: &str = "HDD only";
const SSD_256: &str = "SSD 256 GB";
const SSD_512: &str = "SSD 512 GB";
const SSD_1T: &str = "SSD 1 TB";
const SSD_2T: &str = "SSD 2 TB or more";

const GPU_INTEGRATED: &str = "Integrated graphics (Intel UHD, AMD Radeon)";
const GPU_APPLE: &str = "Apple integrated GPU (M1/M2/M3/M4)";
const GPU_GTX: &str = "NVIDIA GTX series (GTX 1650, 1660)";
const GPU_RTX_ENTRY: &str = "NVIDIA RTX entry (RTX 3050, 4050)";
const GPU_RTX_MID: &str = "NVIDIA RTX mid-range (RTX 3060, 4060)";
const GPU_RTX_HIGH: &str = "NVIDIA RTX high-end (RTX 4070, 4080, 4090)";
const GPU_RADEON: &str = "AMD Radeon RX dedicated";
const GPU_PRO: &str = "Professional card (Quadro, RTX A series)";

const HD: &str = "HD (1366x768)";
const FULL_HD: &str = "Full HD (1920x1080)";
const QHD: &str = "2.5K / QHD (2560x1440)";
const UHD_4K: &str = "4K UHD (3840x2160)";
const OLED_FHD: &str = "OLED Full HD";
const OLED_4K: &str = "OLED 4K";

const HZ_60: &str = "60 Hz";
const HZ_120: &str = "120 Hz";
const HZ_144: &str = "144 Hz";
const HZ_165: &str = "165 Hz or more";

const APPLE: &str = "Apple";
const ASUS: &str = "ASUS";
const DELL: &str = "Dell";
const MSI: &str = "MSI";
const RAZER: &str = "Razer";

const ULTRAPORTABLE: &str = "Ultraportable (under 1.3 kg)";
const LIGHT: &str = "Light (1.3 kg - 2 kg)";

/// The 17 declared specifications and their options.
pub fn vocabulary() -> Vocabulary {
    Vocabulary::new()
        .with_choice(
            attr::SCREEN_SIZE,
            ["14 inch", "15.6 inch", "16 inch", "17 inch or more"],
        )
        .with_choice(attr::USAGE, [OFFICE, MULTIMEDIA, GAMING, CREATION, PROFESSIONAL])
        .with_choice(
            attr::CPU,
            [
                I3, I5, I7, I9, R3, R5, R7, R9, M1, M2, M3, M4, CELERON,
                "Other / Unknown",
            ],
        )
        .with_choice(attr::CPU_GENERATION, [GEN_OLD, GEN_RECENT, GEN_LATEST, "Unknown"])
        .with_choice(attr::RAM, [RAM_4, RAM_8, RAM_16, RAM_32, RAM_64])
        .with_choice(attr::STORAGE, [HDD, SSD_256, SSD_512, SSD_1T, SSD_2T])
        .with_choice(
            attr::GPU,
            [
                GPU_INTEGRATED,
                GPU_APPLE,
                GPU_GTX,
                GPU_RTX_ENTRY,
                GPU_RTX_MID,
                GPU_RTX_HIGH,
                GPU_RADEON,
                GPU_PRO,
            ],
        )
        .with_choice(attr::DISPLAY, [HD, FULL_HD, QHD, UHD_4K, OLED_FHD, OLED_4K])
        .with_choice(attr::REFRESH_RATE, [HZ_60, "90 Hz", HZ_120, HZ_144, HZ_165])
        .with_choice(
            attr::BRAND,
            [
                "Acer", ASUS, APPLE, DELL, "HP", "Lenovo", MSI, RAZER, "Samsung", "Other brand",
            ],
        )
        .with_choice(attr::WEIGHT, [ULTRAPORTABLE, LIGHT, "Standard (over 2 kg)"])
        .with_flag(attr::NUMERIC_KEYPAD)
        .with_flag(attr::BACKLIT_KEYBOARD)
        .with_flag(attr::RGB_KEYBOARD)
        .with_flag(attr::THUNDERBOLT)
        .with_flag(attr::HD_WEBCAM)
        .with_flag(attr::FINGERPRINT_READER)
}

fn any(values: &[&str]) -> Condition {
    Condition::any_of(values.iter().copied())
}

/// The catalog rules, in evaluation order.
pub fn rule_list() -> Vec<Rule> {
    vec![
        Rule::new(ENTRY_LEVEL, 0.0, 499.0, "Basic laptop for light use")
            .with_required(attr::CPU, any(&[I3, R3, CELERON]))
            .with_required(attr::RAM, any(&[RAM_4, RAM_8]))
            .with_required(attr::GPU, any(&[GPU_INTEGRATED]))
            .with_optional(attr::STORAGE, any(&[HDD, SSD_256]))
            .with_optional(attr::DISPLAY, any(&[HD, FULL_HD]))
            .with_optional(attr::USAGE, any(&[OFFICE]))
            .with_optional(attr::CPU_GENERATION, any(&[GEN_OLD]))
            .with_excluding(attr::CPU, any(&[I7, I9, R7, R9, M1, M2, M3, M4]))
            .with_excluding(attr::RAM, any(&[RAM_32, RAM_64]))
            .with_excluding(attr::GPU, any(&[GPU_RTX_MID, GPU_RTX_HIGH, GPU_PRO]))
            .with_excluding(attr::BRAND, any(&[APPLE, RAZER]))
            .with_base_confidence(0.75),
        Rule::new(BUDGET, 500.0, 799.0, "Versatile laptop for everyday use")
            .with_required(attr::CPU, any(&[I3, I5, R3, R5]))
            .with_required(attr::RAM, any(&[RAM_8]))
            .with_required(attr::GPU, any(&[GPU_INTEGRATED, GPU_GTX]))
            .with_optional(attr::STORAGE, any(&[SSD_256, SSD_512]))
            .with_optional(attr::DISPLAY, any(&[FULL_HD]))
            .with_optional(attr::USAGE, any(&[OFFICE, MULTIMEDIA]))
            .with_optional(attr::REFRESH_RATE, any(&[HZ_60]))
            .with_excluding(attr::CPU, any(&[I9, R9, M2, M3, M4]))
            .with_excluding(attr::RAM, any(&[RAM_32, RAM_64]))
            .with_excluding(attr::GPU, any(&[GPU_RTX_HIGH, GPU_PRO]))
            .with_excluding(attr::DISPLAY, any(&[UHD_4K, OLED_4K]))
            .with_excluding(attr::BRAND, any(&[APPLE, RAZER]))
            .with_base_confidence(0.78),
        Rule::new(VALUE, 800.0, 1199.0, "Capable laptop for most uses")
            .with_required(attr::CPU, any(&[I5, I7, R5, R7, M1]))
            .with_required(attr::RAM, any(&[RAM_8, RAM_16]))
            .with_optional(attr::STORAGE, any(&[SSD_512, SSD_1T]))
            .with_optional(attr::GPU, any(&[GPU_GTX, GPU_RTX_ENTRY, GPU_APPLE]))
            .with_optional(attr::DISPLAY, any(&[FULL_HD, QHD]))
            .with_optional(attr::USAGE, any(&[MULTIMEDIA, GAMING, PROFESSIONAL]))
            .with_optional(attr::REFRESH_RATE, any(&[HZ_120, HZ_144]))
            .with_optional(attr::CPU_GENERATION, any(&[GEN_RECENT, GEN_LATEST]))
            .with_excluding(attr::CPU, any(&[CELERON]))
            .with_excluding(attr::RAM, any(&[RAM_4]))
            .with_excluding(attr::GPU, any(&[GPU_RTX_HIGH, GPU_PRO]))
            .with_excluding(attr::DISPLAY, any(&[OLED_4K]))
            .with_base_confidence(0.80),
        Rule::new(
            UPPER_MID_RANGE,
            1200.0,
            1799.0,
            "Performance laptop for gaming and creative work",
        )
        .with_required(attr::CPU, any(&[I5, I7, R5, R7, M1, M2]))
        .with_required(attr::RAM, any(&[RAM_16, RAM_32]))
        .with_optional(attr::STORAGE, any(&[SSD_512, SSD_1T]))
        .with_optional(
            attr::GPU,
            any(&[GPU_RTX_ENTRY, GPU_RTX_MID, GPU_APPLE, GPU_RADEON]),
        )
        .with_optional(attr::DISPLAY, any(&[FULL_HD, QHD, OLED_FHD]))
        .with_optional(attr::USAGE, any(&[GAMING, CREATION, PROFESSIONAL]))
        .with_optional(attr::REFRESH_RATE, any(&[HZ_120, HZ_144, HZ_165]))
        .with_optional(attr::CPU_GENERATION, any(&[GEN_RECENT, GEN_LATEST]))
        .with_optional(attr::NUMERIC_KEYPAD, Condition::flag(true))
        .with_optional(attr::BACKLIT_KEYBOARD, Condition::flag(true))
        .with_excluding(attr::CPU, any(&[CELERON, I3, R3]))
        .with_excluding(attr::RAM, any(&[RAM_4, RAM_8]))
        .with_excluding(attr::DISPLAY, any(&[HD]))
        .with_base_confidence(0.82),
        Rule::new(
            HIGH_END,
            1800.0,
            2499.0,
            "High-performance laptop for professionals and creators",
        )
        .with_required(attr::CPU, any(&[I7, I9, R7, R9, M2, M3]))
        .with_required(attr::RAM, any(&[RAM_16, RAM_32]))
        .with_optional(attr::STORAGE, any(&[SSD_1T, SSD_2T]))
        .with_optional(attr::GPU, any(&[GPU_RTX_MID, GPU_RTX_HIGH, GPU_APPLE]))
        .with_optional(attr::DISPLAY, any(&[QHD, UHD_4K, OLED_FHD, OLED_4K]))
        .with_optional(attr::USAGE, any(&[GAMING, CREATION, PROFESSIONAL]))
        .with_optional(attr::REFRESH_RATE, any(&[HZ_144, HZ_165]))
        .with_optional(attr::CPU_GENERATION, any(&[GEN_LATEST]))
        .with_optional(attr::BRAND, any(&[APPLE, ASUS, MSI, RAZER, DELL]))
        .with_optional(attr::THUNDERBOLT, Condition::flag(true))
        .with_optional(attr::WEIGHT, any(&[ULTRAPORTABLE, LIGHT]))
        .with_excluding(attr::CPU, any(&[CELERON, I3, R3]))
        .with_excluding(attr::RAM, any(&[RAM_4, RAM_8]))
        .with_excluding(attr::STORAGE, any(&[HDD, SSD_256]))
        .with_excluding(attr::DISPLAY, any(&[HD]))
        .with_base_confidence(0.83),
        Rule::new(
            PREMIUM,
            2500.0,
            10000.0,
            "Top-tier laptop for intensive workloads",
        )
        .with_required(attr::CPU, any(&[I9, R9, M3, M4]))
        .with_required(attr::RAM, any(&[RAM_32, RAM_64]))
        .with_optional(attr::STORAGE, any(&[SSD_1T, SSD_2T]))
        .with_optional(attr::GPU, any(&[GPU_RTX_HIGH, GPU_PRO, GPU_APPLE]))
        .with_optional(attr::DISPLAY, any(&[UHD_4K, OLED_4K]))
        .with_optional(attr::USAGE, any(&[CREATION, PROFESSIONAL]))
        .with_optional(attr::REFRESH_RATE, any(&[HZ_144, HZ_165]))
        .with_optional(attr::CPU_GENERATION, any(&[GEN_LATEST]))
        .with_optional(attr::BRAND, any(&[APPLE, RAZER, MSI]))
        .with_optional(attr::THUNDERBOLT, Condition::flag(true))
        .with_excluding(attr::CPU, any(&[CELERON, I3, I5, R3, R5]))
        .with_excluding(attr::RAM, any(&[RAM_4, RAM_8, RAM_16]))
        .with_excluding(attr::STORAGE, any(&[HDD, SSD_256]))
        .with_excluding(attr::GPU, any(&[GPU_INTEGRATED]))
        .with_excluding(attr::DISPLAY, any(&[HD, FULL_HD]))
        .with_base_confidence(0.85),
        Rule::new(UPPER_MID_RANGE, 1200.0, 1799.0, "Performance gaming laptop")
            .with_required(attr::USAGE, any(&[GAMING]))
            .with_required(attr::GPU, any(&[GPU_RTX_ENTRY, GPU_RTX_MID]))
            .with_required(attr::RAM, any(&[RAM_16]))
            .with_optional(attr::REFRESH_RATE, any(&[HZ_120, HZ_144, HZ_165]))
            .with_optional(attr::CPU, any(&[I5, I7, R5, R7]))
            .with_optional(attr::STORAGE, any(&[SSD_512, SSD_1T]))
            .with_optional(attr::RGB_KEYBOARD, Condition::flag(true))
            .with_excluding(attr::GPU, any(&[GPU_INTEGRATED]))
            .with_excluding(attr::REFRESH_RATE, any(&[HZ_60]))
            .with_base_confidence(0.84),
        Rule::new(VALUE, 800.0, 1199.0, "Base MacBook Air configuration")
            .with_required(attr::BRAND, any(&[APPLE]))
            .with_required(attr::CPU, any(&[M1, M2]))
            .with_required(attr::RAM, any(&[RAM_8, RAM_16]))
            .with_optional(attr::STORAGE, any(&[SSD_256, SSD_512]))
            .with_optional(attr::WEIGHT, any(&[ULTRAPORTABLE, LIGHT]))
            .with_excluding(attr::RAM, any(&[RAM_32, RAM_64]))
            .with_excluding(attr::CPU, any(&[M3, M4]))
            .with_base_confidence(0.88),
    ]
}

/// The catalog as a validated rule table.
pub fn rules() -> RuleResult<RuleTable> {
    RuleTable::new(rule_list())
}
