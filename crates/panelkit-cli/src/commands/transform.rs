//! Within and between commands - append a transformed column to a file.

use colored::Colorize;
use panelkit::{Aggregator, PanelSession, PanelTable};

use crate::cli::TransformArgs;
use crate::load;

use super::panel_from_flags;

/// Which grouped transformation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    Within,
    Between,
}

impl Transform {
    fn name(&self) -> &'static str {
        match self {
            Transform::Within => "within",
            Transform::Between => "between",
        }
    }
}

pub fn run(
    transform: Transform,
    args: TransformArgs,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let table = PanelTable::new(load::read_table(&args.file)?);
    let overrides = panel_from_flags(&args.panel)?;
    let aggregator = Aggregator::from_name(&args.agg)?;
    let values = table.numeric_column(&args.column)?;

    let session = PanelSession::new();
    let out = match transform {
        Transform::Within => session.within(
            &values,
            &table,
            &aggregator,
            &overrides,
            args.force_uniqueness_check,
        )?,
        Transform::Between => session.between(
            &values,
            &table,
            &aggregator,
            &overrides,
            args.force_uniqueness_check,
        )?,
    };

    let name = args
        .name
        .unwrap_or_else(|| format!("{}_{}", args.column, transform.name()));
    let missing = out.iter().filter(|v| v.is_none()).count();
    let table = table.with_column(name.as_str(), &out)?;

    load::write_table(table.table(), args.output.as_deref())?;

    // Progress goes to stderr so stdout stays a clean table.
    if verbose || args.output.is_some() {
        eprintln!(
            "{} {} ({} of '{}' by {}, {} missing)",
            "Wrote".green().bold(),
            name.white().bold(),
            aggregator.name(),
            args.column,
            overrides.i.names().join(", "),
            missing
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::*;
    use crate::cli::PanelFlags;

    fn args(file: &Path, output: &Path) -> TransformArgs {
        TransformArgs {
            file: file.to_path_buf(),
            column: "x".into(),
            panel: PanelFlags {
                id: vec!["id".into()],
                ..Default::default()
            },
            agg: "mean".into(),
            name: None,
            output: Some(output.to_path_buf()),
            force_uniqueness_check: false,
        }
    }

    #[test]
    fn test_within_appends_column() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("panel.csv");
        let output = dir.path().join("out.csv");
        fs::write(&input, "id,t,x\n1,1,10\n1,2,20\n2,1,30\n2,2,NA\n").unwrap();

        run(Transform::Within, args(&input, &output), false).unwrap();
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "id,t,x,x_within\n1,1,10,-5\n1,2,20,5\n2,1,30,0\n2,2,NA,NA\n"
        );
    }

    #[test]
    fn test_between_with_custom_name() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("panel.tsv");
        let output = dir.path().join("out.tsv");
        fs::write(&input, "id\tx\n1\t10\n1\t20\n2\t30\n2\t50\n").unwrap();

        let mut between = args(&input, &output);
        between.name = Some("xb".into());
        run(Transform::Between, between, false).unwrap();
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "id\tx\txb\n1\t10\t-12.5\n1\t20\t-12.5\n2\t30\t12.5\n2\t50\t12.5\n"
        );
    }

    #[test]
    fn test_transform_errors() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("panel.csv");
        let output = dir.path().join("out.csv");
        fs::write(&input, "id,x\n1,10\n2,20\n").unwrap();

        let mut no_id = args(&input, &output);
        no_id.panel = PanelFlags::default();
        let err = run(Transform::Within, no_id, false).unwrap_err();
        assert!(err.to_string().contains("within requires panel structure"));

        let mut bad_agg = args(&input, &output);
        bad_agg.agg = "mode".into();
        assert!(run(Transform::Within, bad_agg, false).is_err());
        assert!(!output.exists());
    }
}
