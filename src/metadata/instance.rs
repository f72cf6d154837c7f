//! Read/Overwrite block metadata.

use super::{basename, first_quoted, ExchangeKind, InstanceRecord};
use crate::error::{Result, WrapperError};
use crate::tree::{Document, Node};

/// Extract the record of the exchange block owning variable `name`.
///
/// The block's signal node (`<basename>.y` or `<basename>.u`) provides the
/// unit and, for overwrites, the bounds; `<basename>.description` provides
/// the description. Returns the basename together with the record.
pub fn extract_instance(
    doc: &Document,
    name: &str,
    kind: ExchangeKind,
) -> Result<(String, InstanceRecord)> {
    let base = basename(name);

    let signal_name = format!("{}{}", base, kind.signal_suffix());
    let signal = doc
        .find_by_name(&signal_name)
        .ok_or_else(|| WrapperError::MissingNode(signal_name.clone()))?;
    let unit = quoted_string(&signal, &["attributesValues", "unit"])?;

    let description_name = format!("{}.description", base);
    let description_node = doc
        .find_by_name(&description_name)
        .ok_or_else(|| WrapperError::MissingNode(description_name.clone()))?;
    let description = quoted_string(&description_node, &["bindExpression"])?;

    let (minimum, maximum) = match kind {
        ExchangeKind::Read => (None, None),
        ExchangeKind::Overwrite => (
            Some(bound(&signal, "minValue")?),
            Some(bound(&signal, "maxValue")?),
        ),
    };

    Ok((
        base.to_string(),
        InstanceRecord {
            unit,
            description,
            minimum,
            maximum,
        },
    ))
}

fn quoted_string(node: &Node<'_>, path: &[&str]) -> Result<String> {
    let value = node.require_string(path)?;
    first_quoted(value)
        .map(str::to_string)
        .ok_or_else(|| WrapperError::malformed(&node.label(), &path.join("/"), format!("no quoted value in {}", value)))
}

fn bound(node: &Node<'_>, tag: &str) -> Result<f64> {
    let value = node.require_string(&["attributesValues", tag])?;
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| WrapperError::malformed(&node.label(), tag, format!("not a number: {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(body: &str) -> Document {
        Document::parse(&format!("<dae><variables>{}</variables></dae>", body)).unwrap()
    }

    const OVERWRITE: &str = r#"
        <variable name="oveT.boptestOverwrite"/>
        <variable name="oveT.u">
          <attributesValues>
            <unit string="&quot;K&quot;"/>
            <minValue string="280"/>
            <maxValue string=" 3.2e2 "/>
          </attributesValues>
        </variable>
        <variable name="oveT.description">
          <bindExpression string="&quot;Zone setpoint&quot;"/>
        </variable>"#;

    #[test]
    fn test_overwrite_record() {
        let doc = doc(OVERWRITE);
        let (base, record) =
            extract_instance(&doc, "oveT.boptestOverwrite", ExchangeKind::Overwrite).unwrap();
        assert_eq!(base, "oveT");
        assert_eq!(
            record,
            InstanceRecord {
                unit: "K".into(),
                description: "Zone setpoint".into(),
                minimum: Some(280.0),
                maximum: Some(320.0),
            }
        );
    }

    #[test]
    fn test_read_record_has_no_bounds() {
        let doc = doc(
            r#"
            <variable name="rea.TZon.y">
              <attributesValues><unit string="&quot;degC&quot;"/></attributesValues>
            </variable>
            <variable name="rea.TZon.description">
              <bindExpression string="&quot;Zone temperature&quot;"/>
            </variable>"#,
        );
        let (base, record) =
            extract_instance(&doc, "rea.TZon.boptestRead", ExchangeKind::Read).unwrap();
        assert_eq!(base, "rea.TZon");
        assert_eq!(record.unit, "degC");
        assert_eq!(record.description, "Zone temperature");
        assert_eq!(record.minimum, None);
        assert_eq!(record.maximum, None);
    }

    #[test]
    fn test_missing_signal_node() {
        let doc = doc(OVERWRITE);
        let err = extract_instance(&doc, "oveT.boptestRead", ExchangeKind::Read).unwrap_err();
        assert!(matches!(err, WrapperError::MissingNode(ref name) if name == "oveT.y"));
    }

    #[test]
    fn test_missing_description_node() {
        let doc = doc(
            r#"<variable name="a.y"><attributesValues><unit string="&quot;W&quot;"/></attributesValues></variable>"#,
        );
        let err = extract_instance(&doc, "a.boptestRead", ExchangeKind::Read).unwrap_err();
        assert!(matches!(err, WrapperError::MissingNode(ref name) if name == "a.description"));
    }

    #[test]
    fn test_unquoted_unit_is_malformed() {
        let doc = doc(
            r#"
            <variable name="a.y"><attributesValues><unit string="W"/></attributesValues></variable>
            <variable name="a.description"><bindExpression string="&quot;power&quot;"/></variable>"#,
        );
        let err = extract_instance(&doc, "a.boptestRead", ExchangeKind::Read).unwrap_err();
        assert!(matches!(
            err,
            WrapperError::MalformedAttribute { ref node, ref attribute, .. }
                if node == "a.y" && attribute == "attributesValues/unit"
        ));
    }

    #[test]
    fn test_unparseable_bound_is_malformed() {
        let doc = doc(&OVERWRITE.replace("string=\"280\"", "string=\"low\""));
        let err =
            extract_instance(&doc, "oveT.boptestOverwrite", ExchangeKind::Overwrite).unwrap_err();
        assert!(matches!(
            err,
            WrapperError::MalformedAttribute { ref attribute, .. } if attribute == "minValue"
        ));
    }

    #[test]
    fn test_missing_bound_child() {
        let doc = doc(&OVERWRITE.replace("<maxValue string=\" 3.2e2 \"/>", ""));
        let err =
            extract_instance(&doc, "oveT.boptestOverwrite", ExchangeKind::Overwrite).unwrap_err();
        assert!(matches!(err, WrapperError::MissingChild { ref child, .. } if child == "attributesValues/maxValue"));
    }
}
