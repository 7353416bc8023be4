// standard library
use std::collections::BTreeMap;

// internal modules
use crate::error::{Error, Malformed, Result};
use crate::short_id::ShortId;

// decaychain modules
use decaychain_utils::{clean_text, f, slug, OptionExt, ValueExt};

/// Longest name kept for a record
const NAME_LENGTH: usize = 30;

/// Longest decay-type label kept for a branch
pub(crate) const LABEL_LENGTH: usize = 30;

/// One outgoing channel of an unstable isotope
///
/// Branches can only be built through [DecayBranch::new()], which rejects a
/// product that is not a canonical short id and any probability outside of
/// (0, 1].
///
/// ```rust
/// # use decaychain_nuclide::DecayBranch;
/// let beta = DecayBranch::new("Ac-225", 1.0, Some(0.36)).unwrap();
/// assert_eq!(beta.product(), "Ac-225");
///
/// assert!(DecayBranch::new("Ac-225", 0.0, None).is_err());
/// assert!(DecayBranch::new("ac225", 1.0, None).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DecayBranch {
    product: String,
    probability: f64,
    released_energy: Option<f64>,
}

impl DecayBranch {
    /// Validated branch to `product` with a branching ratio
    ///
    /// The energy released (MeV) is informational only and is never used
    /// by the stepping algorithm.
    pub fn new(product: &str, probability: f64, released_energy: Option<f64>) -> Result<Self> {
        check_branch("branch", product, probability).map_err(|reason| Error::MalformedRecord {
            id: product.to_string(),
            reason,
        })?;

        Ok(Self {
            product: product.to_string(),
            probability,
            released_energy,
        })
    }

    /// Short id of the resulting isotope
    pub fn product(&self) -> &str {
        &self.product
    }

    /// Branching ratio in (0, 1]
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Energy released (MeV), if known
    pub fn released_energy(&self) -> Option<f64> {
        self.released_energy
    }
}

/// Branch checks shared by the factory and the raw decoder
pub(crate) fn check_branch(
    label: &str,
    product: &str,
    probability: f64,
) -> core::result::Result<(), Malformed> {
    if !ShortId::is_canonical(product) {
        return Err(Malformed::InvalidShortId(product.to_string()));
    }

    if !(probability > 0.0 && probability <= 1.0) {
        return Err(Malformed::ProbabilityOutOfRange {
            label: label.to_string(),
            value: probability,
        });
    }

    Ok(())
}

/// Decay behaviour of an isotope
///
/// Keeping the half-life and the branches together makes "unstable without
/// decays" unrepresentable.
#[derive(Debug, Clone, PartialEq)]
pub enum Decay {
    /// No half-life, mass carries over unchanged
    Stable,
    /// Exponential decay with at least one branch
    Unstable {
        /// Half-life (s), always positive and finite
        half_life: f64,
        /// Decay-type label (e.g. "alpha") to branch
        branches: BTreeMap<String, DecayBranch>,
    },
}

/// Immutable definition of a single nuclide
///
/// Records are built through [IsotopeRecord::stable()],
/// [IsotopeRecord::unstable()], or decoded from the persisted store shape,
/// and every path applies the same validation.
///
/// ```rust
/// # use decaychain_nuclide::{DecayBranch, IsotopeRecord};
/// let ra225 = IsotopeRecord::unstable(
///     "Radium",
///     "Ra",
///     225,
///     1_287_360.0,
///     [("beta_minus", DecayBranch::new("Ac-225", 1.0, None).unwrap())],
/// )
/// .unwrap()
/// .with_numbers(Some(88), Some(137))
/// .with_reference(Some("ENSDF"));
///
/// assert_eq!(ra225.short_id(), "Ra-225");
/// assert_eq!(ra225.half_life(), Some(1_287_360.0));
/// assert!(!ra225.is_stable());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IsotopeRecord {
    name: String,
    symbol: String,
    mass_number: u32,
    short_id: String,
    proton_number: Option<u32>,
    neutron_number: Option<u32>,
    reference: Option<String>,
    decay: Decay,
}

impl IsotopeRecord {
    /// Stable isotope with the minimum required data
    pub fn stable(name: &str, symbol: &str, mass_number: u32) -> Result<Self> {
        Self::build(name, symbol, mass_number, Decay::Stable)
    }

    /// Unstable isotope with a half-life (s) and at least one branch
    ///
    /// Branch labels are normalised to lowercase with underscores, so
    /// `"Beta Minus"` is stored as `"beta_minus"`. Two labels that normalise
    /// to the same key are rejected.
    pub fn unstable<L, I>(
        name: &str,
        symbol: &str,
        mass_number: u32,
        half_life: f64,
        branches: I,
    ) -> Result<Self>
    where
        L: Into<String>,
        I: IntoIterator<Item = (L, DecayBranch)>,
    {
        let mut labelled = BTreeMap::new();
        for (label, branch) in branches {
            let label: String = label.into();
            if labelled.insert(slug(&label, LABEL_LENGTH), branch).is_some() {
                return Err(Error::MalformedRecord {
                    id: ShortId::new(symbol, mass_number)
                        .map(|id| id.to_string())
                        .unwrap_or_else(|_| f!("{symbol}-{mass_number}")),
                    reason: Malformed::DuplicateLabel(label),
                });
            }
        }

        Self::build(
            name,
            symbol,
            mass_number,
            Decay::Unstable {
                half_life,
                branches: labelled,
            },
        )
    }

    /// Common validation for every construction path
    pub(crate) fn build(name: &str, symbol: &str, mass_number: u32, decay: Decay) -> Result<Self> {
        let short_id = ShortId::new(symbol, mass_number).map_err(|_| Error::MalformedRecord {
            id: f!("{symbol}-{mass_number}"),
            reason: Malformed::InvalidShortId(f!("{symbol}-{mass_number}")),
        })?;
        let id = short_id.to_string();

        let malformed = |reason| Error::MalformedRecord {
            id: id.clone(),
            reason,
        };

        if name.trim().is_empty() {
            return Err(malformed(Malformed::MissingField("name")));
        }

        if let Decay::Unstable {
            half_life,
            branches,
        } = &decay
        {
            if !(half_life.is_finite() && *half_life > 0.0) {
                return Err(malformed(Malformed::NonPositiveHalfLife(*half_life)));
            }
            if branches.is_empty() {
                return Err(malformed(Malformed::EmptyDecays));
            }
            for (label, branch) in branches {
                if label.is_empty() {
                    return Err(malformed(Malformed::MissingField("decay label")));
                }
                check_branch(label, &branch.product, branch.probability).map_err(malformed)?;
            }
        }

        Ok(Self {
            name: clean_text(name, NAME_LENGTH),
            symbol: short_id.symbol,
            mass_number,
            short_id: id,
            proton_number: None,
            neutron_number: None,
            reference: None,
            decay,
        })
    }

    /// Set the optional proton (Z) and neutron (N) numbers
    pub fn with_numbers(mut self, proton_number: Option<u32>, neutron_number: Option<u32>) -> Self {
        self.proton_number = proton_number;
        self.neutron_number = neutron_number;
        self
    }

    /// Set the optional data reference, blank text counts as none
    pub fn with_reference(mut self, reference: Option<&str>) -> Self {
        self.reference = reference
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(str::to_string);
        self
    }

    /// Element or isotope name, e.g. "Radium"
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Chemical symbol, e.g. "Ra"
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Mass number (A)
    pub fn mass_number(&self) -> u32 {
        self.mass_number
    }

    /// Registry key, `Symbol-MassNumber`
    pub fn short_id(&self) -> &str {
        &self.short_id
    }

    /// Proton number (Z), if known
    pub fn proton_number(&self) -> Option<u32> {
        self.proton_number
    }

    /// Neutron number (N), if known
    pub fn neutron_number(&self) -> Option<u32> {
        self.neutron_number
    }

    /// Free-text data reference
    pub fn reference(&self) -> Option<&str> {
        self.reference.as_deref()
    }

    /// Decay behaviour
    pub fn decay(&self) -> &Decay {
        &self.decay
    }

    /// Half-life (s), `None` for stable isotopes
    pub fn half_life(&self) -> Option<f64> {
        match &self.decay {
            Decay::Stable => None,
            Decay::Unstable { half_life, .. } => Some(*half_life),
        }
    }

    /// Decay branches keyed by decay-type label, `None` for stable isotopes
    pub fn decays(&self) -> Option<&BTreeMap<String, DecayBranch>> {
        match &self.decay {
            Decay::Stable => None,
            Decay::Unstable { branches, .. } => Some(branches),
        }
    }

    /// True if the isotope has no half-life
    pub fn is_stable(&self) -> bool {
        matches!(self.decay, Decay::Stable)
    }

    /// Iterator over every branch, empty for stable isotopes
    pub fn branches(&self) -> impl Iterator<Item = &DecayBranch> {
        self.decays().into_iter().flat_map(|b| b.values())
    }

    /// Sum of the branching ratios
    ///
    /// Expected to be 1.0, which is only warned about when building a registry.
    pub fn probability_sum(&self) -> f64 {
        self.branches().map(DecayBranch::probability).sum()
    }
}

impl std::fmt::Display for IsotopeRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let mut s = f!("{} ({})\n", self.short_id, self.name);
        s += &f!("  Proton number    {}\n", self.proton_number.display());
        s += &f!("  Neutron number   {}\n", self.neutron_number.display());
        s += &f!("  Reference        {}\n", self.reference.display());

        match &self.decay {
            Decay::Stable => s += "  Half life        stable\n",
            Decay::Unstable {
                half_life,
                branches,
            } => {
                s += &f!("  Half life        {} s\n", half_life.sci(5, 2));
                for (label, branch) in branches {
                    s += &f!(
                        "  {:<16} -> {} ({:.4}, {} MeV)\n",
                        label,
                        branch.product,
                        branch.probability,
                        branch.released_energy.display()
                    );
                }
            }
        }

        write!(f, "{}", s.trim_end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn beta(product: &str, p: f64) -> DecayBranch {
        DecayBranch::new(product, p, None).unwrap()
    }

    #[test]
    fn stable_record() {
        let ac = IsotopeRecord::stable("Actinium", "ac", 225).unwrap();
        assert_eq!(ac.short_id(), "Ac-225");
        assert_eq!(ac.symbol(), "Ac");
        assert!(ac.is_stable());
        assert_eq!(ac.half_life(), None);
        assert!(ac.decays().is_none());
        assert_eq!(ac.branches().count(), 0);
        assert_eq!(ac.probability_sum(), 0.0);
    }

    #[test]
    fn unstable_requires_branches() {
        let empty: [(&str, DecayBranch); 0] = [];
        let err = IsotopeRecord::unstable("Radium", "Ra", 225, 10.0, empty).unwrap_err();
        assert!(matches!(
            err,
            Error::MalformedRecord {
                reason: Malformed::EmptyDecays,
                ..
            }
        ));
    }

    #[test]
    fn unstable_requires_positive_half_life() {
        for half_life in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err =
                IsotopeRecord::unstable("Radium", "Ra", 225, half_life, [("b", beta("Ac-225", 1.0))])
                    .unwrap_err();
            assert!(matches!(
                err,
                Error::MalformedRecord {
                    reason: Malformed::NonPositiveHalfLife(_),
                    ..
                }
            ));
        }
    }

    #[test]
    fn probability_bounds() {
        assert!(DecayBranch::new("Ac-225", 1.0, None).is_ok());
        assert!(DecayBranch::new("Ac-225", 1e-9, None).is_ok());
        assert!(DecayBranch::new("Ac-225", 0.0, None).is_err());
        assert!(DecayBranch::new("Ac-225", 1.01, None).is_err());
        assert!(DecayBranch::new("Ac-225", f64::NAN, None).is_err());
    }

    #[test]
    fn name_is_required() {
        assert!(IsotopeRecord::stable("  ", "U", 238).is_err());
        assert!(IsotopeRecord::stable("Uranium", "U2", 238).is_err());
    }

    #[test]
    fn labels_and_names_tidied() {
        let bi = IsotopeRecord::unstable(
            "  Bismuth ",
            "Bi",
            213,
            2735.4,
            [("Beta Minus", beta("Po-213", 0.9786)), ("alpha", beta("Tl-209", 0.0214))],
        )
        .unwrap();

        assert_eq!(bi.name(), "Bismuth");
        let labels: Vec<&String> = bi.decays().unwrap().keys().collect();
        assert_eq!(labels, vec!["alpha", "beta_minus"]);

        let blank = IsotopeRecord::unstable("Bismuth", "Bi", 213, 2735.4, [(" ", beta("Po-213", 1.0))]);
        assert!(blank.is_err());
    }

    #[test]
    fn colliding_labels_rejected() {
        let err = IsotopeRecord::unstable(
            "Parent",
            "Xx",
            100,
            60.0,
            [("Beta Minus", beta("Aa-100", 0.5)), ("beta_minus", beta("Bb-100", 0.5))],
        )
        .unwrap_err();

        match err {
            Error::MalformedRecord { id, reason } => {
                assert_eq!(id, "Xx-100");
                assert_eq!(reason, Malformed::DuplicateLabel("beta_minus".to_string()));
            }
            e => panic!("unexpected error {e:?}"),
        }

        let long = "a".repeat(LABEL_LENGTH);
        let truncated = IsotopeRecord::unstable(
            "Parent",
            "Xx",
            100,
            60.0,
            [(f!("{long}_one"), beta("Aa-100", 0.5)), (f!("{long}_two"), beta("Bb-100", 0.5))],
        );
        assert!(matches!(
            truncated,
            Err(Error::MalformedRecord {
                reason: Malformed::DuplicateLabel(_),
                ..
            })
        ));
    }

    #[test]
    fn blank_reference_is_none() {
        let u = IsotopeRecord::stable("Uranium", "U", 238)
            .unwrap()
            .with_reference(Some("  "));
        assert_eq!(u.reference(), None);
    }

    #[test]
    fn unenforced_probability_sum() {
        let bi = IsotopeRecord::unstable(
            "Bismuth",
            "Bi",
            213,
            2735.4,
            [("beta_minus", beta("Po-213", 0.9)), ("alpha", beta("Tl-209", 0.05))],
        )
        .unwrap();
        assert!((bi.probability_sum() - 0.95).abs() < 1e-12);
    }
}
