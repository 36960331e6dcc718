//! CLI argument parsing and run-file tests.
//!
//! The CLI is a binary crate, so the clap layout is mirrored here and parsed
//! with `try_parse_from`; run files are exercised through `quvar-vqe`.

// ============================================================================
// Clap argument parsing
// ============================================================================

mod clap_parsing {
    use clap::{Parser, Subcommand};

    // Mirror of the CLI struct in main.rs
    #[derive(Parser)]
    #[command(name = "quvar")]
    struct TestCli {
        #[arg(short, long, action = clap::ArgAction::Count, global = true)]
        verbose: u8,

        #[command(subcommand)]
        command: TestCommands,
    }

    #[derive(Subcommand)]
    enum TestCommands {
        Ising {
            #[arg(short, long, default_value = "4")]
            qubits: usize,
            #[arg(short, long)]
            seed: Option<u64>,
        },
        Root {
            #[arg(long, allow_hyphen_values = true)]
            b: f64,
            #[arg(long, allow_hyphen_values = true)]
            c: f64,
            #[arg(short, long)]
            seed: Option<u64>,
        },
        Run {
            #[arg(short, long)]
            config: String,
            #[arg(long)]
            json: bool,
        },
    }

    #[test]
    fn test_parse_ising_defaults() {
        let cli = TestCli::try_parse_from(["quvar", "ising"]).unwrap();
        assert_eq!(cli.verbose, 0);
        match cli.command {
            TestCommands::Ising { qubits, seed } => {
                assert_eq!(qubits, 4);
                assert_eq!(seed, None);
            }
            _ => panic!("Expected Ising command"),
        }
    }

    #[test]
    fn test_parse_ising_with_seed() {
        let cli =
            TestCli::try_parse_from(["quvar", "ising", "--qubits", "6", "--seed", "42"]).unwrap();
        match cli.command {
            TestCommands::Ising { qubits, seed } => {
                assert_eq!(qubits, 6);
                assert_eq!(seed, Some(42));
            }
            _ => panic!("Expected Ising command"),
        }
    }

    #[test]
    fn test_parse_root_negative_coefficient() {
        let cli = TestCli::try_parse_from(["quvar", "root", "--b", "-4", "--c", "4"]).unwrap();
        match cli.command {
            TestCommands::Root { b, c, seed } => {
                assert_eq!(b, -4.0);
                assert_eq!(c, 4.0);
                assert_eq!(seed, None);
            }
            _ => panic!("Expected Root command"),
        }
    }

    #[test]
    fn test_parse_root_missing_coefficient() {
        assert!(TestCli::try_parse_from(["quvar", "root", "--b", "-2"]).is_err());
    }

    #[test]
    fn test_parse_root_not_a_number() {
        assert!(TestCli::try_parse_from(["quvar", "root", "--b", "two", "--c", "1"]).is_err());
    }

    #[test]
    fn test_parse_run_json() {
        let cli = TestCli::try_parse_from(["quvar", "run", "-c", "run.yaml", "--json"]).unwrap();
        match cli.command {
            TestCommands::Run { config, json } => {
                assert_eq!(config, "run.yaml");
                assert!(json);
            }
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_parse_run_missing_config() {
        assert!(TestCli::try_parse_from(["quvar", "run"]).is_err());
    }

    #[test]
    fn test_verbosity_count() {
        let cli = TestCli::try_parse_from(["quvar", "-vvv", "ising"]).unwrap();
        assert_eq!(cli.verbose, 3);
        let cli = TestCli::try_parse_from(["quvar", "ising", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_unknown_subcommand() {
        assert!(TestCli::try_parse_from(["quvar", "compile"]).is_err());
    }
}

// ============================================================================
// Run files
// ============================================================================

mod run_files {
    use std::io::Write;

    use quvar_vqe::{ConfigError, Direction, RunConfig};

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_root_run_file() {
        let file = write_config(
            "
operator:
  num_qubits: 1
  terms:
    - { label: Z, coeff: 1.5 }
    - { label: I, coeff: 2.5 }
direction: maximize
seed: 12
",
        );
        let config = RunConfig::from_file(file.path()).unwrap();
        assert_eq!(config.direction, Direction::Maximize);

        let outcome = config.run().unwrap();
        assert!((outcome.optimal_value.sqrt() - 2.0).abs() < 1e-3);

        let json = serde_json_string(&outcome);
        assert!(json.contains("\"direction\": \"maximize\""));
    }

    #[test]
    fn test_bad_label_reports_at_run() {
        let file = write_config(
            "
operator:
  num_qubits: 2
  terms:
    - { label: ZQ, coeff: 1.0 }
",
        );
        let config = RunConfig::from_file(file.path()).unwrap();
        let err = config.run().unwrap_err();
        assert!(err.to_string().contains("ZQ"));
    }

    #[test]
    fn test_invalid_yaml() {
        let file = write_config("operator: [not, a, map]\n");
        assert!(matches!(
            RunConfig::from_file(file.path()),
            Err(ConfigError::ParseError(_))
        ));
    }

    fn serde_json_string(outcome: &quvar_vqe::VqeOutcome) -> String {
        serde_json::to_string_pretty(outcome).unwrap()
    }
}
