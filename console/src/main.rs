mod annotation;
mod count;
mod features;
mod query;
mod utils;

use annotation::AnnotationArgs;
use clap::{
    Parser,
    Subcommand,
};
use count::CountArgs;
use features::FeaturesArgs;
use query::QueryArgs;
use utils::UtilsArgs;
use wild::ArgsOs;

#[derive(Parser, Debug)]
#[command(
    author = env!("CARGO_PKG_AUTHORS"),
    version = env!("CARGO_PKG_VERSION"),
    about = env!("CARGO_PKG_DESCRIPTION"),
    long_about = None,)]
struct Cli {
    #[command(subcommand)]
    command: MainMenu,
}

#[derive(Subcommand, Debug)]
enum MainMenu {
    /// Count aligned reads per annotated feature.
    Count {
        #[clap(flatten)]
        utils:      UtilsArgs,
        #[clap(flatten)]
        annotation: AnnotationArgs,
        #[clap(flatten)]
        args:       CountArgs,
    },

    /// Report the annotated zones overlapping genomic regions.
    Query {
        #[clap(flatten)]
        utils:      UtilsArgs,
        #[clap(flatten)]
        annotation: AnnotationArgs,
        #[clap(flatten)]
        args:       QueryArgs,
    },

    /// List the feature ids of an annotation.
    Features {
        #[clap(flatten)]
        utils:      UtilsArgs,
        #[clap(flatten)]
        annotation: AnnotationArgs,
        #[clap(flatten)]
        args:       FeaturesArgs,
    },
}

fn main() -> anyhow::Result<()> {
    let args: ArgsOs = wild::args_os();
    let cli = Cli::parse_from(args);

    match cli.command {
        MainMenu::Count {
            utils,
            annotation,
            args,
        } => {
            utils.setup()?;
            args.run(&annotation, &utils)?;
        },
        MainMenu::Query {
            utils,
            annotation,
            args,
        } => {
            utils.setup()?;
            args.run(&annotation, &utils)?;
        },
        MainMenu::Features {
            utils,
            annotation,
            args,
        } => {
            utils.setup()?;
            args.run(&annotation, &utils)?;
        },
    }
    Ok(())
}
