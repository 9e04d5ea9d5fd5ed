use std::fs::File;
use std::io::{
    BufWriter,
    Write,
};
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use genarray::data_structs::coords::Interval;
use genarray::data_structs::typedef::PosType;
use genarray::data_structs::Strand;
use itertools::Itertools;
use log::{
    debug,
    warn,
};
use serde::Serialize;

use crate::annotation::AnnotationArgs;
use crate::utils::UtilsArgs;

#[derive(Args, Debug, Clone)]
pub(crate) struct QueryArgs {
    #[arg(
        value_parser,
        num_args = 1..,
        required = true,
        help = "Regions to query, as chr:start-end. Coordinates are 1-based and \
                inclusive."
    )]
    regions: Vec<String>,
    #[arg(
        short = 'o',
        long,
        help = "Path for the JSON lines output. Standard output when not set."
    )]
    output:  Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct ZoneRecord<'a> {
    region:   &'a str,
    chr:      &'a str,
    start:    PosType,
    end:      PosType,
    strand:   Strand,
    features: Vec<String>,
}

impl QueryArgs {
    pub fn run(
        &self,
        annotation: &AnnotationArgs,
        _utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        let regions = self
            .regions
            .iter()
            .map(|region| {
                region
                    .parse::<Interval>()
                    .with_context(|| format!("Bad region '{}'", region))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        let array = annotation.load()?;

        let mut sink: Box<dyn Write> = match &self.output {
            Some(path) => {
                Box::new(BufWriter::new(File::create(path).with_context(|| {
                    format!("Failed to create {}", path.display())
                })?))
            },
            None => Box::new(BufWriter::new(std::io::stdout().lock())),
        };

        for (raw, region) in self.regions.iter().zip(regions.iter()) {
            let Some(entries) = array.get_entries(region)
            else {
                warn!("No zones for region {}", raw);
                continue;
            };
            debug!("{}: {} zones", raw, entries.len());
            for (zone, values) in entries.iter() {
                let record = ZoneRecord {
                    region:   raw,
                    chr:      zone.chr().as_str(),
                    start:    zone.start(),
                    end:      zone.end(),
                    strand:   zone.strand(),
                    features: values.iter().map(|v| v.to_string()).sorted().collect(),
                };
                serde_json::to_writer(&mut sink, &record)?;
                writeln!(sink)?;
            }
        }
        sink.flush()?;
        Ok(())
    }
}
