use std::io::Write;

use clap::Args;
use log::info;

use crate::annotation::AnnotationArgs;
use crate::utils::UtilsArgs;

#[derive(Args, Debug, Clone)]
pub(crate) struct FeaturesArgs {
    #[arg(
        long,
        default_value_t = false,
        help = "Print the chromosome names instead of feature ids."
    )]
    chromosomes: bool,
}

impl FeaturesArgs {
    pub fn run(
        &self,
        annotation: &AnnotationArgs,
        _utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        let array = annotation.load()?;
        let mut stdout = std::io::stdout().lock();

        if self.chromosomes {
            for name in array.chromosome_names() {
                writeln!(stdout, "{}", name)?;
            }
        }
        else {
            let ids = array.features_ids();
            info!("{} distinct features", ids.len());
            for id in ids {
                writeln!(stdout, "{}", id)?;
            }
        }
        stdout.flush()?;
        Ok(())
    }
}
