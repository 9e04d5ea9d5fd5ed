//! Annotation loaders feeding a [`GenomicArray`].
//!
//! Each BED, GFF3 or GTF record becomes one
//! [`add_entry`](GenomicArray::add_entry) call whose value is the feature
//! identifier.

use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use anyhow::{
    anyhow,
    Context,
};
use bio::io::gff::GffType;
use log::{
    debug,
    info,
    warn,
};

use crate::data_structs::coords::Interval;
use crate::data_structs::typedef::FeatureId;
use crate::data_structs::GenomicArray;
use crate::with_field_fn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "console", derive(clap::ValueEnum))]
pub enum AnnotationFormat {
    /// BED, 0-based half-open. The name column is the feature id.
    Bed,
    /// GFF3.
    Gff,
    /// GTF (GFF2).
    Gtf,
}

impl AnnotationFormat {
    /// Attribute holding the feature id when none is configured.
    pub fn default_id_attribute(&self) -> Option<&'static str> {
        match self {
            AnnotationFormat::Bed => None,
            AnnotationFormat::Gff => Some("ID"),
            AnnotationFormat::Gtf => Some("gene_id"),
        }
    }

    /// Feature type kept when none is configured.
    pub fn default_feature_type(&self) -> Option<&'static str> {
        match self {
            AnnotationFormat::Bed => None,
            AnnotationFormat::Gff | AnnotationFormat::Gtf => Some("exon"),
        }
    }
}

impl FromStr for AnnotationFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "bed" => Ok(AnnotationFormat::Bed),
            "gff" | "gff3" => Ok(AnnotationFormat::Gff),
            "gtf" | "gff2" => Ok(AnnotationFormat::Gtf),
            other => Err(anyhow!("Unknown annotation format: {}", other)),
        }
    }
}

/// Outcome of one load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadSummary {
    /// Records inserted into the array.
    pub loaded:   usize,
    /// Records of another feature type.
    pub filtered: usize,
    /// Records dropped because they carry no feature id or cover no base.
    pub skipped:  usize,
}

#[derive(Debug, Clone)]
pub struct AnnotationLoader {
    format:       AnnotationFormat,
    feature_type: Option<String>,
    id_attribute: Option<String>,
}

impl AnnotationLoader {
    pub fn new(format: AnnotationFormat) -> Self {
        Self {
            format,
            feature_type: format.default_feature_type().map(String::from),
            id_attribute: format.default_id_attribute().map(String::from),
        }
    }

    with_field_fn!(feature_type, Option<String>);

    with_field_fn!(id_attribute, Option<String>);

    pub fn format(&self) -> AnnotationFormat {
        self.format
    }

    /// Reads every record from `reader` into `array`.
    pub fn load<R: Read>(
        &self,
        reader: R,
        array: &mut GenomicArray<FeatureId>,
    ) -> anyhow::Result<LoadSummary> {
        let summary = match self.format {
            AnnotationFormat::Bed => self.load_bed(reader, array)?,
            AnnotationFormat::Gff => self.load_gff(reader, GffType::GFF3, array)?,
            AnnotationFormat::Gtf => self.load_gff(reader, GffType::GTF2, array)?,
        };
        if summary.skipped > 0 {
            match self.format {
                AnnotationFormat::Bed => {
                    warn!("{} zero-length records were skipped", summary.skipped)
                },
                AnnotationFormat::Gff | AnnotationFormat::Gtf => {
                    warn!(
                        "{} records had no '{}' attribute and were skipped",
                        summary.skipped,
                        self.id_attribute.as_deref().unwrap_or_default()
                    )
                },
            }
        }
        info!(
            "Loaded {} features on {} chromosomes ({} filtered by type)",
            summary.loaded,
            array.n_chr(),
            summary.filtered
        );
        Ok(summary)
    }

    /// Builds a fresh array from the annotation file at `path`.
    pub fn load_path<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> anyhow::Result<GenomicArray<FeatureId>> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        let mut array = GenomicArray::new();
        self.load(file, &mut array)
            .with_context(|| format!("Failed to load {}", path.display()))?;
        Ok(array)
    }

    fn load_bed<R: Read>(
        &self,
        reader: R,
        array: &mut GenomicArray<FeatureId>,
    ) -> anyhow::Result<LoadSummary> {
        let mut reader = bio::io::bed::Reader::new(reader);
        let mut summary = LoadSummary::default();

        for (n, record) in reader.records().enumerate() {
            let record = record.with_context(|| format!("Bad BED record {}", n + 1))?;
            if record.end() <= record.start() {
                debug!(
                    "Skipping zero-length BED record {} at {}:{}",
                    n + 1,
                    record.chrom(),
                    record.start()
                );
                summary.skipped += 1;
                continue;
            }
            let interval = Interval::try_from(&record)
                .with_context(|| format!("Bad BED record {}", n + 1))?;
            let id = match record.name() {
                Some(name) if !name.is_empty() => FeatureId::from(name),
                _ => {
                    FeatureId::from(format!(
                        "{}:{}-{}",
                        interval.chr(),
                        interval.start(),
                        interval.end()
                    ))
                },
            };
            array.add_entry(&interval, id)?;
            summary.loaded += 1;
        }
        debug!("Read {} BED records", summary.loaded);
        Ok(summary)
    }

    fn load_gff<R: Read>(
        &self,
        reader: R,
        gff_type: GffType,
        array: &mut GenomicArray<FeatureId>,
    ) -> anyhow::Result<LoadSummary> {
        let mut reader = bio::io::gff::Reader::new(reader, gff_type);
        let id_attribute = self
            .id_attribute
            .as_deref()
            .ok_or_else(|| anyhow!("No id attribute configured for {:?}", self.format))?;
        let mut summary = LoadSummary::default();

        for (n, record) in reader.records().enumerate() {
            let record = record.with_context(|| format!("Bad GFF record {}", n + 1))?;
            if let Some(feature_type) = self.feature_type.as_deref() {
                if record.feature_type() != feature_type {
                    summary.filtered += 1;
                    continue;
                }
            }
            let Some(id) = record.attributes().get(id_attribute)
            else {
                summary.skipped += 1;
                continue;
            };
            let interval = Interval::try_from(&record)
                .with_context(|| format!("Bad GFF record {}", n + 1))?;
            array.add_entry(&interval, FeatureId::from(id.trim_matches('"')))?;
            summary.loaded += 1;
        }
        Ok(summary)
    }
}
