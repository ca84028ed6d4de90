/// Defines a fieldless enum whose variants map one-to-one onto lowercase
/// wire labels, and generates:
/// - derives (Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)
/// - `ALL` with every variant in declaration order
/// - `as_str()` returning the wire label
/// - `Display` and `FromStr` (case-insensitive, errors name the rejected label)
///
/// Usage:
///   define_label_enum!(ScareLevel { Low => "low", Medium => "medium", High => "high" });
#[macro_export]
macro_rules! define_label_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Copy,
            Clone,
            PartialEq,
            Eq,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let normalized = s.trim().to_lowercase();
                match normalized.as_str() {
                    $($label => Ok($name::$variant),)+
                    _ => Err(format!(
                        "Unknown {} '{}'",
                        stringify!($name),
                        s
                    )),
                }
            }
        }
    };
}
