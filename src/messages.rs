//! Localization boundary. The pipeline only ever hands a `MessageKey` to the
//! catalog and stores the returned string verbatim; it never inspects the
//! content. Message strings may carry paired `<ul>`/`<li>` markers that the
//! display layer converts to presentation markup.

/// Keys for every user-facing message the pipeline can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    MissingSource,
    BarShapeMismatch,
    PieShapeMismatch,
    LineShapeMismatch,
    XyShapeMismatch,
    XyUnmappedVariant,
}

/// Maps a message key to a display string. Implemented by the host's
/// localization layer; a plain English catalog ships as the fallback.
pub trait MessageCatalog {
    fn message(&self, key: MessageKey) -> String;
}

/// Built-in English strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishCatalog;

impl MessageCatalog for EnglishCatalog {
    fn message(&self, key: MessageKey) -> String {
        let text = match key {
            MessageKey::MissingSource => {
                "The data view does not contain the sections needed to draw a chart. \
                 Add a category and a measure to get started."
            }
            MessageKey::BarShapeMismatch => {
                "Bar charts need the following fields:<ul>\
                 <li>Exactly one Category</li>\
                 <li>Exactly one Measure</li>\
                 <li>No Series</li></ul>"
            }
            MessageKey::PieShapeMismatch => {
                "Pie charts need the following fields:<ul>\
                 <li>Exactly one Category</li>\
                 <li>Exactly one Measure</li>\
                 <li>No Series</li></ul>"
            }
            MessageKey::LineShapeMismatch => {
                "Line charts need one of the following field combinations:<ul>\
                 <li>One Category and one Measure</li>\
                 <li>One Category, one Series and one Measure</li>\
                 <li>One Category and two or more Measures, with no Series</li></ul>"
            }
            MessageKey::XyShapeMismatch => {
                "XY charts need a numeric or date Category, plus one of:<ul>\
                 <li>One or more Measures</li>\
                 <li>Exactly one Measure and one Series</li></ul>"
            }
            MessageKey::XyUnmappedVariant => {
                "This XY field combination is recognised but cannot be plotted yet. \
                 Use a measure field rather than a numeric grouping field."
            }
        };
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_covers_all_keys() {
        let catalog = EnglishCatalog;
        for key in [
            MessageKey::MissingSource,
            MessageKey::BarShapeMismatch,
            MessageKey::PieShapeMismatch,
            MessageKey::LineShapeMismatch,
            MessageKey::XyShapeMismatch,
            MessageKey::XyUnmappedVariant,
        ] {
            assert!(!catalog.message(key).is_empty());
        }
    }

    #[test]
    fn test_list_markers_are_paired() {
        let catalog = EnglishCatalog;
        let text = catalog.message(MessageKey::BarShapeMismatch);
        assert_eq!(text.matches("<ul>").count(), text.matches("</ul>").count());
        assert_eq!(text.matches("<li>").count(), text.matches("</li>").count());
    }
}
