//! Checker for incremental SAT solver proofs in the LIDRUP format

use clap::{Arg, ArgGroup, ArgMatches};
use lidrup_common::{
    checker::{Checker, Mode, Options},
    comment, config, puts,
    output::{install_signal_handler, print_solution, Timer},
    parser::File,
};

fn main() {
    std::process::exit(run_frontend());
}

/// Run `lidrup-check`, returning its exit code.
///
/// This is a separate function because `std::process::exit` does not
/// call destructors.
fn run_frontend() -> i32 {
    install_signal_handler();
    let mut app = clap::App::new("lidrup-check")
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .after_help(
            "If two files are specified the first '<icnf>' is an incremental CNF file
augmented with all interactions between the user and the SAT solver.
The second '<lidrup>' file is a super-set of the interaction file which
additionally contains all the low level linear incremental DRUP proof
steps. The checker then makes sure the interactions match the proof and
all proof steps are justified.

If only the '<lidrup>' file is specified its query and input lines are
trusted as the user's inputs, and the rest of the checking works
exactly the same way.

Input files may be compressed - supported file extensions are: zst, gz, bz2, xz and lz4.",
        )
        .arg(
            Arg::with_name("FILES")
                .required(true)
                .multiple(true)
                .max_values(2)
                .help("interaction file (optional) and LIDRUP proof file"),
        )
        .arg(
            Arg::with_name("quiet")
                .short("q")
                .long("quiet")
                .help("Do not print any message beside errors."),
        )
        .arg(
            Arg::with_name("verbose")
                .short("v")
                .long("verbose")
                .multiple(true)
                .help("Print more verbose messages too."),
        )
        .arg(
            Arg::with_name("no-reuse")
                .short("n")
                .long("no-reuse")
                .help("Do not allow to reuse clause identifiers."),
        )
        .arg(
            Arg::with_name("strict")
                .long("strict")
                .help("Strict mode, the default (requires 'm' and 'u' proof lines only)."),
        )
        .arg(
            Arg::with_name("relaxed")
                .long("relaxed")
                .help("Relaxed mode (missing 'm' and 'u' proof lines ignored)."),
        )
        .arg(
            Arg::with_name("pedantic")
                .long("pedantic")
                .help("Pedantic mode (requires conclusion lines in both files)."),
        )
        .group(ArgGroup::with_name("mode").args(&["strict", "relaxed", "pedantic"]));
    if config::ENABLE_LOGGING {
        app = app.arg(
            Arg::with_name("logging")
                .short("l")
                .long("logging")
                .help("Enable very verbose logging."),
        );
    }

    let matches = app.get_matches();
    let flags = Flags::new(matches);

    if flags.verbosity >= 0 {
        comment!("LIDRUP Incremental DRUP Checker");
        comment!("Version {}", env!("CARGO_PKG_VERSION"));
        puts!("c\n");
        if flags.no_reuse {
            comment!("checking that all clause identifiers are distinct");
        } else {
            comment!("allowing to reuse deleted clause identifiers");
        }
        if let Some(interactions_filename) = &flags.interactions_filename {
            comment!("reading incremental CNF '{}'", interactions_filename);
        }
        comment!(
            "reading and checking incremental DRUP proof '{}'",
            flags.proof_filename
        );
    }

    let interactions = flags
        .interactions_filename
        .as_ref()
        .map(|filename| File::from_path(filename, false));
    let proof = File::from_path(&flags.proof_filename, true);

    let mut timer = Timer::new("total time");
    timer.disabled = flags.verbosity < 0;
    let mut checker = Checker::new(
        interactions,
        proof,
        Options {
            mode: flags.mode,
            no_reuse: flags.no_reuse,
            verbosity: flags.verbosity,
        },
    );
    let result = checker.check();

    if let Err(error) = result {
        eprintln!("lidrup-check: {}", error);
        return 1;
    }

    if flags.verbosity >= 0 {
        puts!("c\n");
    }
    print_solution("VERIFIED");
    if flags.verbosity > 0 {
        puts!("c\n");
        checker.print_close_messages();
        checker.print_memory_usage();
    }
    if flags.verbosity >= 0 {
        puts!("c\n");
        checker.print_statistics();
        drop(timer);
        comment!("exit 0");
    }
    0
}

/// Parsed arguments. See `lidrup-check --help`.
#[derive(Debug)]
struct Flags {
    mode: Mode,
    no_reuse: bool,
    verbosity: i32,
    /// Present when interactions are cross-checked against the proof
    interactions_filename: Option<String>,
    /// Input proof
    proof_filename: String,
}

impl Flags {
    /// Create a flags instance from command line arguments.
    fn new(matches: ArgMatches) -> Flags {
        let files: Vec<&str> = matches.values_of("FILES").unwrap().collect();
        let (interactions_filename, proof_filename) = match files.as_slice() {
            [proof] => (None, proof.to_string()),
            [interactions, proof] => (Some(interactions.to_string()), proof.to_string()),
            _ => unreachable!(),
        };
        let mode = if matches.is_present("relaxed") {
            Mode::Relaxed
        } else if matches.is_present("pedantic") {
            Mode::Pedantic
        } else {
            Mode::Strict
        };
        let mut verbosity = 0;
        if matches.is_present("quiet") {
            verbosity = -1;
        }
        verbosity += matches.occurrences_of("verbose") as i32;
        if config::ENABLE_LOGGING && matches.is_present("logging") {
            verbosity = i32::max_value();
        }
        Flags {
            mode,
            no_reuse: matches.is_present("no-reuse"),
            verbosity,
            interactions_filename,
            proof_filename,
        }
    }
}
