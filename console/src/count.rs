use std::fs::File;
use std::io::{
    BufWriter,
    Write,
};
use std::path::{
    Path,
    PathBuf,
};

use anyhow::{
    anyhow,
    Context,
};
use clap::Args;
use console::style;
use genarray::data_structs::typedef::{
    FeatureId,
    PosType,
};
use genarray::data_structs::GenomicArray;
use genarray::io::reads::DEFAULT_BATCH_SIZE;
use genarray::io::ReadBlocksReader;
use genarray::tools::count::{
    count_reads,
    CountConfig,
    FeatureCounts,
    OverlapMode,
    StrandMode,
    AMBIGUOUS_LABEL,
    NO_FEATURE_LABEL,
};
use indicatif::ProgressBar;
use itertools::Itertools;
use log::info;

use crate::annotation::AnnotationArgs;
use crate::utils::{
    expand_wildcards,
    init_pbar,
    UtilsArgs,
};

#[derive(Args, Debug, Clone)]
pub(crate) struct CountArgs {
    #[arg(
        value_parser,
        num_args = 1..,
        required = true,
        help = "Paths to BED/BED12 files of aligned reads."
    )]
    reads:       Vec<String>,
    #[arg(
        short = 'o',
        long,
        required = true,
        help = "Path for the generated counts table."
    )]
    output:      PathBuf,
    #[arg(
        short = 'm',
        long,
        value_enum,
        default_value_t = OverlapMode::Union,
        help_heading = "COUNTING",
        help = "How reads overlapping several zones are resolved."
    )]
    mode:        OverlapMode,
    #[arg(
        short = 's',
        long,
        value_enum,
        default_value_t = StrandMode::Yes,
        help_heading = "COUNTING",
        help = "Whether reads must be on the same strand as the feature."
    )]
    stranded:    StrandMode,
    #[arg(
        long,
        default_value_t = 1,
        help_heading = "COUNTING",
        help = "Minimal overlap (bp) between a read block and a zone."
    )]
    min_overlap: PosType,
    #[arg(
        long,
        default_value_t = DEFAULT_BATCH_SIZE,
        help_heading = "COUNTING",
        help = "Number of reads processed at once."
    )]
    batch_size:  usize,
}

impl CountArgs {
    pub fn run(
        &self,
        annotation: &AnnotationArgs,
        utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        let paths = expand_wildcards(&self.reads);
        if paths.is_empty() {
            return Err(anyhow!("No read files matched"));
        }
        for path in paths.iter() {
            if !path.is_file() {
                return Err(anyhow!(
                    "Path {} is not a file.",
                    style(path.display()).red()
                ));
            }
        }
        if self.output.is_dir() {
            return Err(anyhow!(
                "Output path {} is a directory.",
                style(self.output.display()).red()
            ));
        }

        let array = annotation.load()?;
        let config = CountConfig::default()
            .with_overlap_mode(self.mode)
            .with_strand_mode(self.stranded)
            .with_min_overlap(self.min_overlap);

        let progress_bar = if utils.progress {
            init_pbar(paths.len())?
        }
        else {
            ProgressBar::hidden()
        };

        let mut samples = Vec::with_capacity(paths.len());
        for path in paths.iter() {
            progress_bar.set_message(format!("{}", path.display()));
            let counts = self
                .count_file(&array, &config, path)
                .with_context(|| format!("Failed to count {}", path.display()))?;
            info!(
                "{}: {} reads, {} without feature, {} ambiguous",
                path.display(),
                counts.total(),
                counts.no_feature(),
                counts.ambiguous()
            );
            samples.push(counts);
            progress_bar.inc(1);
        }
        progress_bar.finish_with_message("Done.");

        let sink = BufWriter::new(
            File::create(&self.output)
                .with_context(|| format!("Failed to create {}", self.output.display()))?,
        );
        match samples.as_slice() {
            [single] => single.write_tsv(sink)?,
            _ => write_table(&samples, sink)?,
        }
        Ok(())
    }

    fn count_file(
        &self,
        array: &GenomicArray<FeatureId>,
        config: &CountConfig,
        path: &Path,
    ) -> anyhow::Result<FeatureCounts<FeatureId>> {
        let ids = array.features_ids().into_iter().map(FeatureId::from);
        let mut counts = FeatureCounts::with_features(ids);
        let reader = ReadBlocksReader::from_path(path)?.with_batch_size(self.batch_size);
        for batch in reader {
            counts.merge(count_reads(array, config, &batch?));
        }
        Ok(counts)
    }
}

/// One row per feature, one column per sample, without a header.
fn write_table<W: Write>(
    samples: &[FeatureCounts<FeatureId>],
    sink: W,
) -> anyhow::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(sink);

    let ids = samples
        .iter()
        .flat_map(|counts| counts.iter_sorted().map(|(id, _)| id.clone()))
        .sorted()
        .dedup()
        .collect_vec();
    for id in ids.iter() {
        let row = std::iter::once(id.to_string())
            .chain(samples.iter().map(|counts| counts.get(id).to_string()));
        writer.write_record(row)?;
    }

    let special = [
        (NO_FEATURE_LABEL, samples.iter().map(|c| c.no_feature()).collect_vec()),
        (AMBIGUOUS_LABEL, samples.iter().map(|c| c.ambiguous()).collect_vec()),
    ];
    for (label, values) in special {
        let row = std::iter::once(label.to_string())
            .chain(values.into_iter().map(|v| v.to_string()));
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}
