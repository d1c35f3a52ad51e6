use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{CoreError, Symbol, ValidationError};

/// Immutable description of a base/alt pair, e.g. an index and a leveraged
/// ETF tracking it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairSpec {
    pub base: Symbol,
    pub alt: Symbol,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_ratio: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
}

impl PairSpec {
    pub fn new(
        base: Symbol,
        alt: Symbol,
        target_ratio: Option<f64>,
    ) -> Result<Self, ValidationError> {
        let spec = Self {
            base,
            alt,
            target_ratio,
            issuer: None,
        };
        spec.validate()?;
        Ok(spec)
    }

    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Parse `BASE:ALT` or `BASE:ALT:TARGET`.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let mut parts = input.split(':');
        let base = Symbol::parse(parts.next().unwrap_or_default())?;
        let alt = Symbol::parse(parts.next().unwrap_or_default())?;
        let target_ratio = parts
            .next()
            .map(|raw| {
                raw.trim()
                    .parse::<f64>()
                    .map_err(|_| ValidationError::NonFiniteValue {
                        field: "target_ratio",
                    })
            })
            .transpose()?;
        if parts.next().is_some() {
            return Err(ValidationError::InvalidPairFormat {
                value: input.to_owned(),
            });
        }
        Self::new(base, alt, target_ratio)
    }

    pub fn label(&self) -> String {
        format!("{}->{}", self.base, self.alt)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base == self.alt {
            return Err(ValidationError::SelfPair {
                symbol: self.base.to_string(),
            });
        }
        if let Some(target) = self.target_ratio {
            if !target.is_finite() {
                return Err(ValidationError::NonFiniteValue {
                    field: "target_ratio",
                });
            }
        }
        Ok(())
    }
}

/// Ordered collection of pairs to analyse together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PairUniverse {
    pairs: Vec<PairSpec>,
}

impl PairUniverse {
    pub fn new(pairs: Vec<PairSpec>) -> Result<Self, ValidationError> {
        for pair in &pairs {
            pair.validate()?;
        }
        Ok(Self { pairs })
    }

    pub fn from_json_str(input: &str) -> Result<Self, CoreError> {
        let pairs: Vec<PairSpec> = serde_json::from_str(input)?;
        Ok(Self::new(pairs)?)
    }

    pub fn pairs(&self) -> &[PairSpec] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Every symbol referenced by the universe, deduplicated and sorted.
    pub fn symbols(&self) -> BTreeSet<Symbol> {
        self.pairs
            .iter()
            .flat_map(|pair| [pair.base.clone(), pair.alt.clone()])
            .collect()
    }

    /// Restrict to the given issuers and bases. An empty filter keeps all.
    pub fn filter(&self, issuers: &[String], bases: &[Symbol]) -> Self {
        let pairs = self
            .pairs
            .iter()
            .filter(|pair| {
                issuers.is_empty()
                    || pair
                        .issuer
                        .as_ref()
                        .is_some_and(|issuer| issuers.iter().any(|wanted| wanted == issuer))
            })
            .filter(|pair| bases.is_empty() || bases.contains(&pair.base))
            .cloned()
            .collect();
        Self { pairs }
    }
}
