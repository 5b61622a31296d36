use tracing::{debug, warn};

use crate::discovery::Assembly;
use crate::domain::{ResolvedTaxid, TaxidSource};
use crate::error::AnnotateError;
use crate::genbank::first_taxon;
use crate::summary::AssemblySummary;

pub trait TaxidStrategy {
    fn lookup(&self, assembly: &Assembly) -> Result<Option<ResolvedTaxid>, AnnotateError>;
}

pub struct ExactMatch<'a> {
    summary: &'a AssemblySummary,
}

impl<'a> ExactMatch<'a> {
    pub fn new(summary: &'a AssemblySummary) -> Self {
        Self { summary }
    }
}

impl TaxidStrategy for ExactMatch<'_> {
    fn lookup(&self, assembly: &Assembly) -> Result<Option<ResolvedTaxid>, AnnotateError> {
        Ok(self
            .summary
            .get(assembly.id.as_str())
            .map(|taxid| ResolvedTaxid::new(taxid, TaxidSource::Exact)))
    }
}

/// Answers only when exactly one summary key starts with the assembly prefix.
pub struct PrefixMatch<'a> {
    summary: &'a AssemblySummary,
}

impl<'a> PrefixMatch<'a> {
    pub fn new(summary: &'a AssemblySummary) -> Self {
        Self { summary }
    }
}

impl TaxidStrategy for PrefixMatch<'_> {
    fn lookup(&self, assembly: &Assembly) -> Result<Option<ResolvedTaxid>, AnnotateError> {
        let mut matches = self.summary.starting_with(assembly.id.prefix());
        match (matches.next(), matches.next()) {
            (Some((_, taxid)), None) => Ok(Some(ResolvedTaxid::new(taxid, TaxidSource::Prefix))),
            _ => Ok(None),
        }
    }
}

pub struct GenBankTaxon;

impl TaxidStrategy for GenBankTaxon {
    fn lookup(&self, assembly: &Assembly) -> Result<Option<ResolvedTaxid>, AnnotateError> {
        let genbank = assembly.require_genbank()?;
        Ok(first_taxon(genbank)?.map(|taxid| ResolvedTaxid::new(taxid, TaxidSource::GenBank)))
    }
}

pub struct TaxonomyResolver<'a> {
    strategies: Vec<Box<dyn TaxidStrategy + 'a>>,
}

impl<'a> TaxonomyResolver<'a> {
    pub fn new(strategies: Vec<Box<dyn TaxidStrategy + 'a>>) -> Self {
        Self { strategies }
    }

    pub fn from_summary(summary: &'a AssemblySummary) -> Self {
        Self::new(vec![
            Box::new(ExactMatch::new(summary)),
            Box::new(PrefixMatch::new(summary)),
        ])
    }

    pub fn with_genbank_fallback(summary: &'a AssemblySummary) -> Self {
        let mut resolver = Self::from_summary(summary);
        resolver.strategies.push(Box::new(GenBankTaxon));
        resolver
    }

    pub fn resolve(&self, assembly: &Assembly) -> Result<ResolvedTaxid, AnnotateError> {
        for strategy in &self.strategies {
            if let Some(resolved) = strategy.lookup(assembly)? {
                debug!(
                    assembly = %assembly.id,
                    taxid = %resolved.taxid,
                    source = %resolved.source,
                    "resolved taxonomy ID"
                );
                return Ok(resolved);
            }
        }
        let prefix = assembly.id.prefix();
        warn!("assembly ID {} is not found, assigning {}", assembly.id, prefix);
        Ok(ResolvedTaxid::new(prefix, TaxidSource::Placeholder))
    }
}
