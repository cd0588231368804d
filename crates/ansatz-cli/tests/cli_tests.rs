//! CLI argument parsing and end-to-end library tests.
//!
//! The CLI is a binary crate, so clap parsing is checked against a mirror
//! of its argument structs, and command behavior through the library crates
//! it drives.

// ============================================================================
// Argument parsing
// ============================================================================

mod parse_tests {
    use clap::{Parser, Subcommand, ValueEnum};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
    enum OutputFormat {
        Json,
        Yaml,
    }

    fn parse_pair(s: &str) -> Result<(u32, u32), String> {
        let (c, t) = s
            .split_once(':')
            .ok_or_else(|| format!("expected CONTROL:TARGET, got '{s}'"))?;
        Ok((
            c.trim().parse().map_err(|e| format!("{e}"))?,
            t.trim().parse().map_err(|e| format!("{e}"))?,
        ))
    }

    #[derive(Parser, Debug)]
    #[command(name = "ansatz")]
    struct TestCli {
        #[arg(short, long, action = clap::ArgAction::Count, global = true)]
        verbose: u8,

        #[arg(short, long, value_enum, default_value = "json", global = true)]
        format: OutputFormat,

        #[arg(short, long, global = true)]
        output: Option<String>,

        #[command(subcommand)]
        command: TestCommands,
    }

    #[derive(Subcommand, Debug)]
    enum TestCommands {
        Rvb {
            #[arg(short, long)]
            num_qubits: u32,
            #[arg(short, long, default_value = "1")]
            reps: usize,
        },
        Hva {
            #[arg(short, long)]
            num_qubits: u32,
            #[arg(short, long, default_value = "1")]
            reps: usize,
            #[arg(long)]
            bell_pairs: bool,
        },
        Cr {
            #[arg(short, long, conflicts_with = "num_qubits")]
            config: Option<String>,
            #[arg(short, long, required_unless_present = "config")]
            num_qubits: Option<u32>,
            #[arg(short, long)]
            reps: Option<usize>,
            #[arg(long = "pair", value_parser = parse_pair)]
            pairs: Vec<(u32, u32)>,
            #[arg(long)]
            add_rz: bool,
            #[arg(long)]
            no_final_rx: bool,
            #[arg(short, long)]
            backend: Option<String>,
            #[arg(long)]
            max_duration: Option<f64>,
            #[arg(long, value_delimiter = ',')]
            physical_qubits: Option<Vec<u32>>,
        },
        Heisenberg {
            #[arg(short, long)]
            num_sites: usize,
            #[arg(long, default_value = "1.0", allow_hyphen_values = true)]
            interaction: f64,
            #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
            onsite: f64,
            #[arg(long)]
            periodic: bool,
        },
        Version,
    }

    #[test]
    fn test_rvb_defaults() {
        let cli = TestCli::try_parse_from(["ansatz", "rvb", "-n", "4"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Json);
        match cli.command {
            TestCommands::Rvb { num_qubits, reps } => {
                assert_eq!(num_qubits, 4);
                assert_eq!(reps, 1);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            TestCli::try_parse_from(["ansatz", "hva", "-n", "6", "--bell-pairs", "-f", "yaml", "-vv"])
                .unwrap();
        assert_eq!(cli.format, OutputFormat::Yaml);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            TestCommands::Hva {
                bell_pairs: true,
                ..
            }
        ));
    }

    #[test]
    fn test_cr_pairs_and_physical_qubits() {
        let cli = TestCli::try_parse_from([
            "ansatz",
            "cr",
            "-n",
            "3",
            "--pair",
            "0:1",
            "--pair",
            "2:1",
            "--physical-qubits",
            "4,5,6",
            "--no-final-rx",
        ])
        .unwrap();
        match cli.command {
            TestCommands::Cr {
                pairs,
                physical_qubits,
                no_final_rx,
                ..
            } => {
                assert_eq!(pairs, vec![(0, 1), (2, 1)]);
                assert_eq!(physical_qubits, Some(vec![4, 5, 6]));
                assert!(no_final_rx);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cr_requires_qubits_or_config() {
        assert!(TestCli::try_parse_from(["ansatz", "cr"]).is_err());
        assert!(TestCli::try_parse_from(["ansatz", "cr", "-c", "ansatz.yaml"]).is_ok());
        assert!(TestCli::try_parse_from(["ansatz", "cr", "-c", "a.yaml", "-n", "2"]).is_err());
    }

    #[test]
    fn test_cr_bad_pair() {
        assert!(TestCli::try_parse_from(["ansatz", "cr", "-n", "2", "--pair", "0-1"]).is_err());
    }

    #[test]
    fn test_heisenberg_negative_coupling() {
        let cli = TestCli::try_parse_from([
            "ansatz",
            "heisenberg",
            "-n",
            "4",
            "--interaction",
            "-1.5",
            "--periodic",
        ])
        .unwrap();
        match cli.command {
            TestCommands::Heisenberg {
                interaction,
                onsite,
                periodic,
                ..
            } => {
                assert_eq!(interaction, -1.5);
                assert_eq!(onsite, 0.0);
                assert!(periodic);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(TestCli::try_parse_from(["ansatz", "version", "-f", "toml"]).is_err());
    }
}

// ============================================================================
// Command behavior
// ============================================================================

mod command_tests {
    use std::sync::Arc;

    use ansatz_forms::{AnsatzBuilder, AnsatzError, CrAnsatz, Hva, PulseAnsatz, Rvb};
    use ansatz_hal::{BackendConfiguration, ConfiguredBackend, SimulatorBackend};

    #[test]
    fn test_rvb_rejects_odd_width() {
        assert!(matches!(
            Rvb::new(3).circuit(),
            Err(AnsatzError::OddQubitCount(3))
        ));
    }

    #[test]
    fn test_hva_output_serializes_as_yaml() {
        let circuit = Hva::new(4).circuit().unwrap();
        let yaml = serde_yaml_ng::to_string(&circuit).unwrap();
        assert!(yaml.contains("name: HVA"));
    }

    #[test]
    fn test_cr_on_configured_backend_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lab.yaml");
        let config = BackendConfiguration::uniform("lab", 4).with_control_channel((1, 2), 7);
        std::fs::write(&path, serde_yaml_ng::to_string(&config).unwrap()).unwrap();

        let loaded = BackendConfiguration::from_file(&path).unwrap();
        let backend = Arc::new(ConfiguredBackend::new(loaded).unwrap());
        let builder = AnsatzBuilder::new(backend, vec![1, 2]);
        let mut ansatz = CrAnsatz::new(2, builder);
        let circuit = ansatz.scheduled_circuit().unwrap();
        assert!(circuit.calibrations().has_gate_on("cr", &[1, 2]));
    }

    #[test]
    fn test_cr_physical_map_must_cover_program_qubits() {
        let builder = AnsatzBuilder::new(Arc::new(SimulatorBackend::new(2)), vec![0]);
        let mut ansatz = CrAnsatz::new(2, builder);
        assert!(ansatz.scheduled_circuit().is_err());
    }
}
