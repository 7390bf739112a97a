//! Built-in affirmation table

use std::collections::BTreeMap;

/// Affirmations keyed by mood level (-2..2)
///
/// serde_json writes the integer keys as strings, so the persisted blob
/// carries the `"-2"`..`"2"` object keys the app has always used.
pub type MoodQuoteTable = BTreeMap<i32, Vec<String>>;

/// The application's fixed affirmation seed, five quotes per mood level.
/// Persisted alongside the entries for resilience, never mutated, and the
/// built-in copy always wins on load.
pub fn seed_quote_table() -> MoodQuoteTable {
    let mut table = BTreeMap::new();

    table.insert(
        -2,
        to_strings(&[
            "You are stronger than you think; the storm will pass.",
            "It's okay to cry. Healing begins when you let your feelings flow.",
            "Even in darkness, a spark of hope can shine bright.",
            "This moment is tough, but you've overcome challenges before.",
            "A gentle step forward, no matter how small, is still progress.",
        ]),
    );
    table.insert(
        -1,
        to_strings(&[
            "Pain is temporary, brighter days lie ahead.",
            "Each setback is a chance to grow and learn.",
            "One small positive thought can change your entire day.",
            "It's okay to rest; self-care isn't selfish.",
            "Healing takes time - be patient and kind to yourself.",
        ]),
    );
    table.insert(
        0,
        to_strings(&[
            "A calm mind can find opportunity in every moment.",
            "Sometimes the greatest triumph is simply finding peace.",
            "Take a moment to breathe; every breath is a fresh start.",
            "Even an ordinary day can hold a pleasant surprise.",
            "Balance isn't found, it's created.",
        ]),
    );
    table.insert(
        1,
        to_strings(&[
            "Happiness grows when it's shared with others.",
            "Celebrate even the small victories to make life extraordinary.",
            "Gratitude can turn what you have into enough.",
            "Keep smiling; your joy can be contagious.",
            "Where focus goes, energy flows - keep your focus on what lifts you.",
        ]),
    );
    table.insert(
        2,
        to_strings(&[
            "When your heart is full, share your light with the world.",
            "Savor the highs in life; they become precious memories.",
            "Joy multiplies when spread among friends.",
            "Trust your journey; you're in a beautiful place right now.",
            "Let your happiness ripple out and inspire others.",
        ]),
    );

    table
}

fn to_strings(quotes: &[&str]) -> Vec<String> {
    quotes.iter().map(|q| q.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_level_has_five_quotes() {
        let table = seed_quote_table();
        assert_eq!(table.len(), 5);
        for level in -2..=2 {
            assert_eq!(table[&level].len(), 5, "level {} should have 5 quotes", level);
        }
    }

    #[test]
    fn test_wire_keys_are_strings() {
        let table = seed_quote_table();
        let json = serde_json::to_value(&table).unwrap();
        let object = json.as_object().unwrap();
        assert!(object.contains_key("-2"));
        assert!(object.contains_key("0"));
        assert!(object.contains_key("2"));
    }
}
