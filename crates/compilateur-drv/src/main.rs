use clap::error::ErrorKind;
use clap::Parser;
use compilateur_drv::{init_logging, run, Config};

fn main() {
    init_logging();

    let config = match Config::try_parse() {
        Ok(config) => config,
        // `--help`/`--version` are success paths by CLI convention: let
        // clap print them to stdout and exit 0 as it normally would.
        // Any other parse failure (missing input file, unknown flag, a
        // dangling `-o`) is a usage error per spec.md's exit-code
        // contract, which calls for 1, not clap's own default of 2.
        Err(err)
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) =>
        {
            err.exit();
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    if let Err(err) = run(&config) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
