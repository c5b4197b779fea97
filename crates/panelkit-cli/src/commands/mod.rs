//! CLI command implementations.

pub mod describe;
pub mod transform;

use panelkit::PanelMetadata;
use panelkit::panel::parse_step;

use crate::cli::PanelFlags;

/// Build the panel triple from command-line flags.
///
/// Flags that were not given stay absent, so a transform falls back to
/// whatever the table already carries.
fn panel_from_flags(flags: &PanelFlags) -> panelkit::Result<PanelMetadata> {
    let step = flags.step.as_deref().map(parse_step).transpose()?;
    PanelMetadata::from_parts(flags.id.clone(), flags.time.clone(), step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use panelkit::{ErrorKind, Identifier};

    #[test]
    fn test_panel_from_flags() {
        let flags = PanelFlags {
            id: vec!["country".into(), "firm".into()],
            time: vec!["year".into()],
            step: Some("0".into()),
        };
        let panel = panel_from_flags(&flags).unwrap();
        assert_eq!(
            panel.i,
            Identifier::Multiple(vec!["country".into(), "firm".into()])
        );
        assert_eq!(panel.t.as_deref(), Some("year"));
        assert!(panel.is_ordinal_time());

        assert!(!panel_from_flags(&PanelFlags::default()).unwrap().is_declared());
    }

    #[test]
    fn test_panel_from_flags_errors() {
        let two_times = PanelFlags {
            time: vec!["year".into(), "quarter".into()],
            ..Default::default()
        };
        assert_eq!(panel_from_flags(&two_times).unwrap_err().kind(), ErrorKind::Arity);

        let bad_step = PanelFlags {
            step: Some("weekly".into()),
            ..Default::default()
        };
        assert_eq!(panel_from_flags(&bad_step).unwrap_err().kind(), ErrorKind::Type);
    }
}
