//! Address spellings tried when looking up a destination.

/// One way of spelling a destination for the routing service.
///
/// The catalogue holds bare town names that exist on both sides of the
/// Dutch/Belgian border, so the provider qualifies them with a country first
/// and only falls back to the bare name.
///
/// # Examples
/// ```
/// use tripsheet_data::routing::AddressVariant;
///
/// let spelled: Vec<String> = AddressVariant::candidates(&AddressVariant::DEFAULT, "Breda").collect();
/// assert_eq!(spelled, ["Breda, Netherlands", "Breda, Belgium", "Breda"]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressVariant {
    /// `"<name>, Netherlands"`.
    Netherlands,
    /// `"<name>, Belgium"`.
    Belgium,
    /// The name as written.
    Bare,
}

impl AddressVariant {
    /// Default lookup order.
    pub const DEFAULT: [Self; 3] = [Self::Netherlands, Self::Belgium, Self::Bare];

    /// Spell `name` under this variant.
    #[must_use]
    pub fn format(self, name: &str) -> String {
        let name = name.trim();
        match self {
            Self::Netherlands => format!("{name}, Netherlands"),
            Self::Belgium => format!("{name}, Belgium"),
            Self::Bare => name.to_owned(),
        }
    }

    /// Every spelling of `name` under `variants`, in order.
    pub fn candidates<'a>(
        variants: &'a [Self],
        name: &'a str,
    ) -> impl Iterator<Item = String> + 'a {
        variants.iter().map(move |variant| variant.format(name))
    }
}
