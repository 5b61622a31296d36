use std::io::Write;

use camino::Utf8Path;
use tracing::{debug, info, warn};

use crate::config::{RunConfig, SplitConfig};
use crate::discovery::{Assembly, discover_assemblies};
use crate::error::AnnotateError;
use crate::fasta::{AnnotatedLine, FastaAnnotator, Records};
use crate::fs_util::gz_lines;
use crate::genbank::GiLookup;
use crate::output::{AssemblyReport, RunReport};
use crate::resolver::TaxonomyResolver;
use crate::splitter::OutputSplitter;
use crate::summary::AssemblySummary;

pub struct App {
    config: RunConfig,
}

impl App {
    pub fn new(config: RunConfig) -> Self {
        Self { config }
    }

    pub fn annotate_to<W: Write>(
        &self,
        out: &mut W,
        output_name: &Utf8Path,
    ) -> Result<RunReport, AnnotateError> {
        let summary = self.load_summary()?;
        let resolver = TaxonomyResolver::from_summary(&summary);
        let mut report = RunReport::new(&self.config.taxonomy_level);

        for assembly in self.assemblies()? {
            info!("processing {}", assembly.fasta);
            let resolved = resolver.resolve(&assembly)?;
            let gis = load_gis(&assembly)?;
            let annotator = FastaAnnotator::new(&resolved.taxid, &gis, &assembly.fasta);

            let mut records = 0u64;
            for line in annotator.annotate(gz_lines(&assembly.fasta)?) {
                let line = line?;
                if matches!(line, AnnotatedLine::Header(_)) {
                    records += 1;
                }
                out.write_all(line.as_bytes())
                    .and_then(|()| out.write_all(b"\n"))
                    .map_err(|err| AnnotateError::io(output_name, err))?;
            }
            report.assemblies.push(AssemblyReport::new(
                assembly.id,
                assembly.fasta,
                resolved,
                records,
            ));
        }
        out.flush().map_err(|err| AnnotateError::io(output_name, err))?;
        Ok(report)
    }

    pub fn split(&self, split: SplitConfig) -> Result<RunReport, AnnotateError> {
        let summary = self.load_summary()?;
        let resolver = TaxonomyResolver::with_genbank_fallback(&summary);
        let mut report = RunReport::new(&self.config.taxonomy_level);
        let mut splitter = OutputSplitter::create(split)?;

        for assembly in self.assemblies()? {
            info!("processing {}", assembly.fasta);
            let resolved = resolver.resolve(&assembly)?;
            let gis = load_gis(&assembly)?;
            let annotator = FastaAnnotator::new(&resolved.taxid, &gis, &assembly.fasta);

            let mut records = 0u64;
            for record in Records::new(annotator.annotate(gz_lines(&assembly.fasta)?)) {
                splitter.append(record?)?;
                records += 1;
            }
            splitter.flush()?;
            debug!(
                assembly = %assembly.id,
                records,
                file = %splitter.current_path(),
                "assembly written"
            );
            report.assemblies.push(AssemblyReport::new(
                assembly.id,
                assembly.fasta,
                resolved,
                records,
            ));
        }
        report.chunks = splitter.finish()?;
        Ok(report)
    }

    fn load_summary(&self) -> Result<AssemblySummary, AnnotateError> {
        let path = self.config.summary_path();
        let summary = AssemblySummary::load(&path)?;
        info!("loaded {} assemblies from {}", summary.len(), path);
        Ok(summary)
    }

    fn assemblies(&self) -> Result<Vec<Assembly>, AnnotateError> {
        let root = self.config.level_root();
        let assemblies = discover_assemblies(&root)?;
        if assemblies.is_empty() {
            warn!("no *_genomic.fna.gz files found under {}", root);
        }
        Ok(assemblies)
    }
}

fn load_gis(assembly: &Assembly) -> Result<GiLookup, AnnotateError> {
    let gis = GiLookup::build(assembly.require_genbank()?)?;
    debug!(assembly = %assembly.id, accessions = gis.len(), "loaded GI lookup");
    Ok(gis)
}
