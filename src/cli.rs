use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "license-ledgr",
    about = "Collect third-party dependency licenses into a shared CSV ledger",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Ledger CSV file to append to
    #[arg(long, global = true, default_value = "LICENSE-3rdparty.csv")]
    pub ledger: PathBuf,

    /// Component name recorded in the first CSV column [default: workspace directory name]
    #[arg(long, global = true)]
    pub component: Option<String>,

    /// Config file [default: ./.license-ledgr/config.toml, fallback ~/.config/license-ledgr/config.toml]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print the appended rows as a table
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print the summary line
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Tally the NuGet packages of a .NET workspace, resolving licenses against nuget.org
    Dotnet {
        /// Workspace directory containing the solution or project
        #[arg(default_value = ".")]
        path: PathBuf,
    },
    /// Convert a Maven-generated license report into ledger rows
    Maven {
        /// Project directory; the report is expected at target/generated-sources/license/licenses.xml
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Explicit path to the licenses.xml report
        #[arg(long)]
        report: Option<PathBuf>,
    },
}
