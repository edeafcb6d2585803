//! Log line formatting.
//!
//! Every line has the shape
//!
//! ```text
//! [<time>] (N: <source> F: <member> L: <line>) [<TAG>] <message>
//! ```
//!
//! Only the tag carries color, and only for markups that support it.

use crate::term;
use logfox_types::{LogEvent, Markup};

/// Render one event as a single log line.
///
/// Pure and infallible: empty fields render as empty segments.
pub fn format(event: &LogEvent, markup: Markup) -> String {
    let tag = term::paint(event.tag.label(), event.tag.color(), markup);

    format!(
        "[{}] (N: {} F: {} L: {}) [{}] {}",
        event.timestamp,
        event.site.source_name,
        event.site.member,
        event.site.line,
        tag,
        event.message
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use logfox_types::{CallSite, Severity, Tag};
    use proptest::prelude::*;

    fn event(severity: Severity, message: &str) -> LogEvent {
        LogEvent::new("10:00:00", CallSite::new("Engine", "boot", 42), severity, message)
    }

    #[test]
    fn test_plain_info_line() {
        let line = format(&event(Severity::Info, "boot"), Markup::Plain);
        assert_eq!(line, "[10:00:00] (N: Engine F: boot L: 42) [INFO] boot");
    }

    #[test]
    fn test_bbcode_wraps_only_the_tag() {
        let line = format(&event(Severity::Warning, "low fuel"), Markup::BbCode);
        assert_eq!(
            line,
            "[10:00:00] (N: Engine F: boot L: 42) [[color=#F9E2AF]WARNING[/color]] low fuel"
        );
    }

    #[test]
    fn test_empty_fields_render_as_empty_segments() {
        let event = LogEvent::new("", CallSite::new("", "", 0), Severity::Error, "");
        assert_eq!(format(&event, Markup::Plain), "[] (N:  F:  L: 0) [ERROR] ");
    }

    #[test]
    fn test_system_info_tag() {
        let event = LogEvent::tagged("t", CallSite::new("a", "b", 1), Tag::SystemInfo, "\nOS: x");
        assert_eq!(
            format(&event, Markup::BbCode),
            "[t] (N: a F: b L: 1) [[color=#94E2D5]SYSTEM INFO[/color]] \nOS: x"
        );
    }

    fn any_severity() -> impl Strategy<Value = Severity> {
        prop::sample::select(Severity::ALL.to_vec())
    }

    fn any_markup() -> impl Strategy<Value = Markup> {
        prop::sample::select(vec![Markup::Plain, Markup::Ansi, Markup::BbCode])
    }

    proptest! {
        #[test]
        fn prop_line_contains_message(
            severity in any_severity(),
            markup in any_markup(),
            message in ".*",
        ) {
            let line = format(&event(severity, &message), markup);
            prop_assert!(line.contains(&message));
        }

        #[test]
        fn prop_formatting_is_idempotent(
            severity in any_severity(),
            markup in any_markup(),
            message in ".*",
        ) {
            let event = event(severity, &message);
            prop_assert_eq!(format(&event, markup), format(&event, markup));
        }

        #[test]
        fn prop_plain_tag_is_pure_function_of_severity(
            severity in any_severity(),
            message in "[a-z ]*",
        ) {
            let line = format(&event(severity, &message), Markup::Plain);
            let expected = format!("[{}] ", severity.tag().label());
            prop_assert!(line.contains(&expected));
        }
    }
}
