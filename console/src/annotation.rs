use std::fs::File;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use console::style;
use genarray::data_structs::typedef::FeatureId;
use genarray::data_structs::GenomicArray;
use genarray::io::{
    read_chrs_from_fai,
    AnnotationFormat,
    AnnotationLoader,
};
use log::info;

#[derive(Args, Debug, Clone)]
pub(crate) struct AnnotationArgs {
    #[arg(
        short = 'a',
        long,
        required = true,
        help_heading = "ANNOTATION",
        help = "Path to the annotation file."
    )]
    annotation:   PathBuf,
    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value_t = AnnotationFormat::Gtf,
        help_heading = "ANNOTATION",
        help = "Annotation format."
    )]
    format:       AnnotationFormat,
    #[arg(
        short = 't',
        long,
        help_heading = "ANNOTATION",
        help = "Feature type (3rd GFF/GTF column) to keep. Defaults to 'exon'."
    )]
    feature_type: Option<String>,
    #[arg(
        long,
        default_value_t = false,
        conflicts_with = "feature_type",
        help_heading = "ANNOTATION",
        help = "Keep records of every feature type."
    )]
    all_types:    bool,
    #[arg(
        short = 'i',
        long,
        help_heading = "ANNOTATION",
        help = "Attribute used as feature id. Defaults to 'ID' for GFF and \
                'gene_id' for GTF."
    )]
    id_attribute: Option<String>,
    #[arg(
        long,
        help_heading = "ANNOTATION",
        help = "FASTA index used to register chromosomes without annotation."
    )]
    fai:          Option<PathBuf>,
}

impl AnnotationArgs {
    pub fn load(&self) -> anyhow::Result<GenomicArray<FeatureId>> {
        if !self.annotation.is_file() {
            anyhow::bail!(
                "Annotation file {} does not exist.",
                style(self.annotation.display()).red()
            );
        }

        let mut loader = AnnotationLoader::new(self.format);
        if self.all_types {
            loader = loader.with_feature_type(None);
        }
        else if let Some(feature_type) = &self.feature_type {
            loader = loader.with_feature_type(Some(feature_type.clone()));
        }
        if let Some(id_attribute) = &self.id_attribute {
            loader = loader.with_id_attribute(Some(id_attribute.clone()));
        }

        let mut array = loader.load_path(&self.annotation)?;

        if let Some(fai) = &self.fai {
            let file = File::open(fai)
                .with_context(|| format!("Failed to open {}", fai.display()))?;
            array.add_chromosomes(read_chrs_from_fai(file)?)?;
        }
        info!(
            "Annotation indexed: {} chromosomes, {} zones",
            array.n_chr(),
            array.n_zones()
        );
        Ok(array)
    }
}
