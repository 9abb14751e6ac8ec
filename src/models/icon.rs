use serde::{Deserialize, Serialize};
use std::fmt;

/// Declares a closed set of icon keys with a glyph for each, plus an
/// `Unknown` variant that keeps the raw key so stored data round-trips.
macro_rules! icon_set {
    (
        $(#[$meta:meta])*
        pub enum $name:ident (fallback = $fallback:literal) {
            $($variant:ident => ($key:literal, $glyph:literal),)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Unknown(String),
        }

        impl $name {
            pub const KNOWN: &'static [$name] = &[$($name::$variant,)+];

            pub const FALLBACK_GLYPH: &'static str = $fallback;

            pub fn from_key(key: &str) -> Self {
                match key {
                    $($key => $name::$variant,)+
                    other => $name::Unknown(other.to_string()),
                }
            }

            pub fn key(&self) -> &str {
                match self {
                    $($name::$variant => $key,)+
                    $name::Unknown(raw) => raw.as_str(),
                }
            }

            pub fn glyph(&self) -> &'static str {
                match self {
                    $($name::$variant => $glyph,)+
                    $name::Unknown(_) => $fallback,
                }
            }

            pub fn is_known(&self) -> bool {
                !matches!(self, $name::Unknown(_))
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                $name::from_key(&value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                $name::from_key(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Unknown(raw) => raw,
                    known => known.key().to_string(),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.key())
            }
        }
    };
}

icon_set! {
    /// Avatar shown next to a child's name.
    pub enum AvatarIcon (fallback = "👤") {
        User => ("user", "👤"),
        Smile => ("smile", "😊"),
        Heart => ("heart", "❤️"),
        Star => ("star", "⭐"),
        Sun => ("sun", "☀️"),
        Moon => ("moon", "🌙"),
        Cloud => ("cloud", "☁️"),
        Flower => ("flower", "🌸"),
        Tree => ("tree", "🌳"),
        Cat => ("cat", "🐱"),
        Dog => ("dog", "🐶"),
        Rabbit => ("rabbit", "🐰"),
        Bear => ("bear", "🐻"),
        Panda => ("panda", "🐼"),
        Monkey => ("monkey", "🐵"),
        Penguin => ("penguin", "🐧"),
        Bird => ("bird", "🐦"),
        Fish => ("fish", "🐠"),
        Turtle => ("turtle", "🐢"),
        Butterfly => ("butterfly", "🦋"),
        Bee => ("bee", "🐝"),
        Ladybug => ("ladybug", "🐞"),
        Rocket => ("rocket", "🚀"),
        Lion => ("lion", "🦁"),
        Tiger => ("tiger", "🐯"),
        Unicorn => ("unicorn", "🦄"),
        Dragon => ("dragon", "🐉"),
        Dolphin => ("dolphin", "🐬"),
        Frog => ("frog", "🐸"),
        Fox => ("fox", "🦊"),
        Koala => ("koala", "🐨"),
        Owl => ("owl", "🦉"),
        Robot => ("robot", "🤖"),
        Crown => ("crown", "👑"),
        Rainbow => ("rainbow", "🌈"),
        Award => ("award", "🏆"),
        Gift => ("gift", "🎁"),
    }
}

icon_set! {
    /// Icon shown on a chore card.
    pub enum ChoreIcon (fallback = "✨") {
        Trash => ("trash", "🗑️"),
        Book => ("book", "📚"),
        Broom => ("broom", "🧹"),
        Dish => ("dish", "🍽️"),
        Laundry => ("laundry", "👕"),
        Plant => ("plant", "🌱"),
        Bed => ("bed", "🛏️"),
        Pet => ("pet", "🐶"),
        Toy => ("toy", "🧸"),
        Clean => ("clean", "🧼"),
        Mail => ("mail", "📬"),
        Shop => ("shop", "🛒"),
        Star => ("star", "⭐"),
        Check => ("check", "✅"),
        Shirt => ("shirt", "👕"),
        Box => ("box", "📦"),
    }
}

impl Default for AvatarIcon {
    fn default() -> Self {
        AvatarIcon::User
    }
}

impl Default for ChoreIcon {
    fn default() -> Self {
        ChoreIcon::Star
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_keys_resolve_to_their_glyph() {
        assert_eq!(AvatarIcon::from_key("cat"), AvatarIcon::Cat);
        assert_eq!(AvatarIcon::Cat.glyph(), "🐱");
        assert_eq!(ChoreIcon::from_key("broom").glyph(), "🧹");
    }

    #[test]
    fn unknown_keys_fall_back_but_keep_the_raw_key() {
        let avatar = AvatarIcon::from_key("spaceship");
        assert!(!avatar.is_known());
        assert_eq!(avatar.glyph(), AvatarIcon::FALLBACK_GLYPH);
        assert_eq!(avatar.key(), "spaceship");

        let chore = ChoreIcon::from_key("");
        assert_eq!(chore.glyph(), "✨");
    }

    #[test]
    fn icons_serialize_as_plain_string_keys() {
        let json = serde_json::to_string(&ChoreIcon::Dish).unwrap();
        assert_eq!(json, "\"dish\"");

        let parsed: AvatarIcon = serde_json::from_str("\"mystery\"").unwrap();
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"mystery\"");
    }

    #[test]
    fn every_known_icon_maps_back_to_itself() {
        for icon in AvatarIcon::KNOWN {
            assert_eq!(&AvatarIcon::from_key(icon.key()), icon);
        }
        for icon in ChoreIcon::KNOWN {
            assert_eq!(&ChoreIcon::from_key(icon.key()), icon);
        }
    }
}
