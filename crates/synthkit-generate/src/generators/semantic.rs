//! Realistic scalar values: names, contact details, addresses, phrases and
//! card details. Every function is a pure function of its seed.

use synthkit_core::{Address, Audience, BusinessProfile, CardDetails, ThreeDSecure, ThreeDSecureResult};

use crate::prng::{field_seed, pick, random_int, weighted_pick};

const FIRST_NAMES: &[&str] = &[
    "Olivia", "Liam", "Emma", "Noah", "Ava", "Elijah", "Sophia", "James", "Isabella", "Lucas",
    "Mia", "Mason", "Amelia", "Ethan", "Harper", "Logan", "Evelyn", "Aiden", "Abigail", "Jackson",
    "Emily", "Sebastian", "Ella", "Mateo", "Chloe", "Henry", "Grace", "Owen", "Nora", "Samuel",
    "Priya", "Wei", "Aisha", "Diego", "Hana", "Omar", "Sofia", "Kenji", "Zara", "Mohammed",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White", "Harris", "Sanchez",
    "Clark", "Ramirez", "Lewis", "Robinson", "Walker", "Young", "Allen", "King", "Wright",
    "Scott", "Nguyen", "Patel", "Kim", "Chen",
];

const COMPANY_STEMS: &[&str] = &[
    "Acme", "Summit", "Horizon", "Pioneer", "Evergreen", "Redwood", "Sterling", "Meridian",
    "Harbor", "Granite", "Crescent", "Silverline", "Brightpath", "Ironclad", "Clearwater",
];

const COMPANY_WORDS: &[&str] = &[
    "Systems", "Analytics", "Works", "Solutions", "Dynamics", "Networks", "Partners", "Digital",
    "Logistics", "Health",
];

const COMPANY_SUFFIXES: &[&str] = &["Inc", "LLC", "Labs", "Group", "Co", "Technologies"];

const CONSUMER_DOMAINS: &[&str] = &[
    "gmail.com",
    "yahoo.com",
    "outlook.com",
    "icloud.com",
    "proton.me",
    "hotmail.com",
];

const B2B_LOCAL_PARTS: &[&str] = &["billing", "finance", "accounts", "ap", "admin", "ops"];

const STREET_NAMES: &[&str] = &[
    "Oak", "Maple", "Cedar", "Pine", "Elm", "Washington", "Lake", "Hill", "Park", "Sunset",
    "Mission", "Market", "Valencia", "Highland", "River",
];

const STREET_TYPES: &[&str] = &["St", "Ave", "Blvd", "Rd", "Ln", "Way", "Dr"];

/// US city table. City, state, zip prefix and area code share an index so
/// generated addresses and phone numbers stay geographically consistent.
#[derive(Debug, Clone, Copy)]
pub struct City {
    pub name: &'static str,
    pub state: &'static str,
    pub zip_prefix: &'static str,
    pub area_code: &'static str,
}

pub const CITIES: &[City] = &[
    City { name: "San Francisco", state: "CA", zip_prefix: "941", area_code: "415" },
    City { name: "Los Angeles", state: "CA", zip_prefix: "900", area_code: "213" },
    City { name: "New York", state: "NY", zip_prefix: "100", area_code: "212" },
    City { name: "Brooklyn", state: "NY", zip_prefix: "112", area_code: "718" },
    City { name: "Austin", state: "TX", zip_prefix: "787", area_code: "512" },
    City { name: "Houston", state: "TX", zip_prefix: "770", area_code: "713" },
    City { name: "Seattle", state: "WA", zip_prefix: "981", area_code: "206" },
    City { name: "Chicago", state: "IL", zip_prefix: "606", area_code: "312" },
    City { name: "Boston", state: "MA", zip_prefix: "021", area_code: "617" },
    City { name: "Denver", state: "CO", zip_prefix: "802", area_code: "303" },
    City { name: "Miami", state: "FL", zip_prefix: "331", area_code: "305" },
    City { name: "Atlanta", state: "GA", zip_prefix: "303", area_code: "404" },
    City { name: "Portland", state: "OR", zip_prefix: "972", area_code: "503" },
    City { name: "Phoenix", state: "AZ", zip_prefix: "850", area_code: "602" },
    City { name: "Nashville", state: "TN", zip_prefix: "372", area_code: "615" },
];

const FALLBACK_CITY: City = City {
    name: "San Francisco",
    state: "CA",
    zip_prefix: "941",
    area_code: "415",
};

const FALLBACK_DESCRIPTIONS: &[&str] = &["Standard service fee", "Product purchase", "Custom order"];

pub fn person_name(seed: i64) -> String {
    let first = pick(field_seed(seed, 0), FIRST_NAMES).copied().unwrap_or("Alex");
    let last = pick(field_seed(seed, 1), LAST_NAMES).copied().unwrap_or("Morgan");
    format!("{first} {last}")
}

/// Company name built from the profile's stems, or the shared stem table
/// when the profile has none.
pub fn company_name(seed: i64, profile: &BusinessProfile) -> String {
    let stem = if profile.company_stems.is_empty() {
        pick(field_seed(seed, 0), COMPANY_STEMS).copied().unwrap_or("Acme")
    } else {
        pick(field_seed(seed, 0), &profile.company_stems)
            .map(String::as_str)
            .unwrap_or("Acme")
    };
    let word = pick(field_seed(seed, 1), COMPANY_WORDS).copied().unwrap_or("Systems");
    let suffix = pick(field_seed(seed, 2), COMPANY_SUFFIXES).copied().unwrap_or("Inc");
    format!("{stem} {word} {suffix}")
}

/// Customer display name: a company for B2B profiles, a person otherwise.
pub fn customer_name(seed: i64, profile: &BusinessProfile) -> String {
    match profile.audience {
        Audience::B2b => company_name(seed, profile),
        Audience::B2c => person_name(seed),
    }
}

/// Email address derived from the customer name.
///
/// B2B addresses use a role mailbox at the company's domain; B2C addresses
/// use the person's name at a consumer mail provider.
pub fn email(seed: i64, name: &str, audience: Audience) -> String {
    match audience {
        Audience::B2b => {
            let local = pick(field_seed(seed, 0), B2B_LOCAL_PARTS).copied().unwrap_or("billing");
            let domain: String = name
                .split_whitespace()
                .filter(|word| !COMPANY_SUFFIXES.contains(word))
                .map(slug)
                .collect();
            let domain = if domain.is_empty() { "example".to_string() } else { domain };
            format!("{local}@{domain}.com")
        }
        Audience::B2c => {
            let local = name
                .split_whitespace()
                .map(slug)
                .filter(|part| !part.is_empty())
                .collect::<Vec<_>>()
                .join(".");
            let local = if local.is_empty() { "customer".to_string() } else { local };
            let number = random_int(field_seed(seed, 1), 0, 99);
            let domain = pick(field_seed(seed, 2), CONSUMER_DOMAINS)
                .copied()
                .unwrap_or("example.com");
            if number < 40 {
                format!("{local}@{domain}")
            } else {
                format!("{local}{number}@{domain}")
            }
        }
    }
}

pub fn city(seed: i64) -> City {
    pick(seed, CITIES).copied().unwrap_or(FALLBACK_CITY)
}

pub fn address(seed: i64, city: &City) -> Address {
    let number = random_int(field_seed(seed, 0), 10, 9899);
    let street = pick(field_seed(seed, 1), STREET_NAMES).copied().unwrap_or("Main");
    let street_type = pick(field_seed(seed, 2), STREET_TYPES).copied().unwrap_or("St");
    let zip_suffix = random_int(field_seed(seed, 3), 0, 99);
    Address {
        line1: format!("{number} {street} {street_type}"),
        city: city.name.to_string(),
        state: city.state.to_string(),
        postal_code: format!("{}{zip_suffix:02}", city.zip_prefix),
        country: "US".to_string(),
    }
}

/// North American phone number using the city's area code.
pub fn phone(seed: i64, city: &City) -> String {
    let exchange = random_int(field_seed(seed, 0), 200, 999);
    let line = random_int(field_seed(seed, 1), 0, 9999);
    format!("+1 ({}) {exchange:03}-{line:04}", city.area_code)
}

/// Short product or service description from the profile's phrase table.
pub fn description(seed: i64, profile: &BusinessProfile) -> String {
    match pick(seed, &profile.descriptions) {
        Some(value) => value.clone(),
        None => pick(seed, FALLBACK_DESCRIPTIONS)
            .copied()
            .unwrap_or("Standard service fee")
            .to_string(),
    }
}

/// Card details for a charge. `three_d_secure` is attached by the caller.
pub fn card_details(seed: i64, reference_year: i32) -> CardDetails {
    let brand = weighted_pick(
        field_seed(seed, 0),
        &[("visa", 55.0), ("mastercard", 30.0), ("amex", 10.0), ("discover", 5.0)],
    )
    .unwrap_or("visa");
    let funding = weighted_pick(field_seed(seed, 1), &[("credit", 65.0), ("debit", 35.0)])
        .unwrap_or("credit");
    CardDetails {
        brand: brand.to_string(),
        last4: format!("{:04}", random_int(field_seed(seed, 2), 0, 9999)),
        exp_month: random_int(field_seed(seed, 3), 1, 12) as u32,
        exp_year: reference_year + random_int(field_seed(seed, 4), 1, 5) as i32,
        funding: funding.to_string(),
        three_d_secure: None,
    }
}

pub fn three_d_secure(seed: i64) -> ThreeDSecure {
    let result = weighted_pick(
        seed,
        &[
            (ThreeDSecureResult::Authenticated, 85.0),
            (ThreeDSecureResult::AttemptAcknowledged, 10.0),
            (ThreeDSecureResult::Failed, 5.0),
        ],
    )
    .unwrap_or(ThreeDSecureResult::Authenticated);
    ThreeDSecure {
        result,
        version: "2.2.0".to_string(),
    }
}

fn slug(value: &str) -> String {
    value
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric())
        .map(|ch| ch.to_ascii_lowercase())
        .collect()
}
