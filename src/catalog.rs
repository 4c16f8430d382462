//! Built-in content: compatibility questions, roommate cards, hostel listings,
//! voice-preference samples and loading phases.

use serde::Serialize;

use crate::state_machine::{Catalog, Item, Modality, Profile};

/// Transcripts the simulated voice input can resolve to.
pub const VOICE_SAMPLES: [&str; 5] = [
    "I prefer quiet environments for studying",
    "I love cooking and sharing meals",
    "I'm a morning person who wakes up early",
    "I enjoy having friends over occasionally",
    "I prefer a clean and organized living space",
];

/// Loading-screen captions, one per 20% of progress.
pub const LOADING_PHASES: [&str; 5] = [
    "Initializing AI Magic",
    "Connecting Hearts",
    "Finding Perfect Matches",
    "Discovering Dream Hostels",
    "Welcome to Room Buddies!",
];

/// The eight-question compatibility assessment.
pub fn questions() -> Catalog {
    let items = vec![
        Item::question(
            "sleep-schedule",
            "Lifestyle",
            "What's your ideal sleep schedule?",
            Modality::SingleSelect,
            &[
                "Early bird (9 PM - 6 AM)",
                "Regular (11 PM - 7 AM)",
                "Night owl (1 AM - 9 AM)",
                "Irregular/Shift work",
            ],
        ),
        Item::question(
            "cleanliness",
            "Living Habits",
            "How important is cleanliness to you? (1-5 scale)",
            Modality::Scale,
            &[],
        ),
        Item::question(
            "social-level",
            "Social",
            "How social are you at home?",
            Modality::SingleSelect,
            &[
                "Love hosting friends regularly",
                "Occasional hangouts",
                "Prefer quiet time",
                "Very private person",
            ],
        ),
        Item::question(
            "cooking-habits",
            "Food & Kitchen",
            "What are your cooking preferences?",
            Modality::SingleSelect,
            &[
                "Love cooking and sharing meals",
                "Cook for myself mostly",
                "Order food frequently",
                "Minimal cooking",
            ],
        ),
        Item::question(
            "noise-tolerance",
            "Environment",
            "How do you handle noise?",
            Modality::SingleSelect,
            &[
                "Very sensitive to noise",
                "Moderate tolerance",
                "Noise doesn't bother me",
                "I'm usually the noisy one",
            ],
        ),
        Item::question(
            "sharing-preferences",
            "Sharing",
            "What are you comfortable sharing?",
            Modality::MultiSelect,
            &[
                "Kitchen utensils",
                "Cleaning supplies",
                "Food items",
                "Personal care products",
                "Clothes/accessories",
            ],
        ),
        Item::question(
            "work-style",
            "Work & Study",
            "What's your work situation?",
            Modality::SingleSelect,
            &[
                "Work from home regularly",
                "9-5 office job",
                "Irregular schedule",
                "Student with flexible hours",
            ],
        ),
        Item::question(
            "guests-policy",
            "Social",
            "How do you feel about guests?",
            Modality::SingleSelect,
            &[
                "Love having people over",
                "Guests are fine with notice",
                "Prefer minimal guests",
                "No guests please",
            ],
        ),
    ];

    build(items)
}

fn profile(
    name: &str,
    age: u8,
    bio: &str,
    interests: &[&str],
    location: &str,
    match_percentage: u8,
    badges: &[&str],
) -> Profile {
    Profile {
        name: name.to_string(),
        age,
        bio: bio.to_string(),
        interests: interests.iter().map(|s| s.to_string()).collect(),
        location: location.to_string(),
        match_percentage,
        verified: true,
        badges: badges.iter().map(|s| s.to_string()).collect(),
    }
}

/// The swipe deck.
pub fn roommates() -> Catalog {
    let items = vec![
        Item::profile(
            "1",
            profile(
                "Ujjwal Agarwal",
                19,
                "Marketing professional who loves cooking and yoga. Looking for a clean, friendly roommate to share a cozy apartment near downtown.",
                &["Cooking", "Yoga", "Reading", "Movies"],
                "Downtown Delhi, 0.5 km",
                94,
                &["Early Bird", "Clean", "Social"],
            ),
        ),
        Item::profile(
            "2",
            profile(
                "Himanshi Agarwal",
                19,
                "Graduate student studying environmental science. Quiet, studious, but enjoys weekend adventures and coffee shop hangouts.",
                &["Hiking", "Coffee", "Sustainability", "Art"],
                "University Area, 1.2 km",
                89,
                &["Student", "Eco-Friendly", "Adventurous"],
            ),
        ),
        Item::profile(
            "3",
            profile(
                "Pooja Kumari",
                20,
                "Software engineer who works remotely. Love plants, board games, and having deep conversations over tea.",
                &["Gaming", "Plants", "Tech", "Tea"],
                "Tech Hub, 0.8 km",
                92,
                &["Remote Worker", "Plant Parent", "Gamer"],
            ),
        ),
        Item::profile(
            "4",
            profile(
                "Maaz Anwar",
                19,
                "Software engineer who works remotely. Quiet, studious, and having deep conversations over tea.",
                &["Cooking", "Yoga", "Tech", "Tea"],
                "University Area, 0.8 km",
                87,
                &["Student", "Remote Worker", "Interactive"],
            ),
        ),
    ];

    build(items)
}

// The lists above are fixed and non-empty with unique ids.
fn build(items: Vec<Item>) -> Catalog {
    match Catalog::new(items) {
        Ok(catalog) => catalog,
        Err(e) => unreachable!("built-in catalog is invalid: {e}"),
    }
}

/// A co-living listing on the discovery page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hostel {
    pub id: String,
    pub name: String,
    pub rating: f32,
    pub review_count: u32,
    pub distance: String,
    pub price_range: String,
    pub amenities: Vec<String>,
    pub description: String,
    pub available_rooms: u32,
    pub roommate_matches: u32,
}

pub fn hostels() -> Vec<Hostel> {
    vec![
        Hostel {
            id: "1".into(),
            name: "Harmony House Co-Living".into(),
            rating: 4.8,
            review_count: 124,
            distance: "0.3 miles away".into(),
            price_range: "$800-1200/month".into(),
            amenities: vec!["Wifi".into(), "Parking".into(), "Gym".into(), "Cafe".into()],
            description: "Modern co-living space designed specifically for women professionals. Features shared kitchens, study areas, and community events.".into(),
            available_rooms: 3,
            roommate_matches: 8,
        },
        Hostel {
            id: "2".into(),
            name: "The Nest Women's Hostel".into(),
            rating: 4.7,
            review_count: 89,
            distance: "0.7 miles away".into(),
            price_range: "$600-900/month".into(),
            amenities: vec!["Wifi".into(), "Cafe".into(), "Garden".into(), "Library".into()],
            description: "Cozy women-only accommodation with a focus on safety and community. Perfect for students and young professionals.".into(),
            available_rooms: 5,
            roommate_matches: 12,
        },
    ]
}
