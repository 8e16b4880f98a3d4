//! Section assembly: flat runs of fields, and wrapping them in containers.

use crate::field::{encode_field, field_text, FieldMap, XmlFragment};
use crate::schema::FieldSpec;

/// Append every field of `specs` that `source` carries, in table order.
/// Absent keys are skipped without a placeholder.
pub fn append_if_present<'a>(
    fragment: &mut XmlFragment,
    specs: impl IntoIterator<Item = &'a FieldSpec>,
    source: &FieldMap,
) {
    for spec in specs {
        if let Some(value) = source.get(spec.name) {
            fragment.push(encode_field(spec.name, &field_text(value), spec.max_len));
        }
    }
}

/// A fresh fragment holding the present fields of `specs`.
pub fn section<'a>(specs: impl IntoIterator<Item = &'a FieldSpec>, source: &FieldMap) -> XmlFragment {
    let mut fragment = XmlFragment::new();
    append_if_present(&mut fragment, specs, source);
    fragment
}

impl XmlFragment {
    /// Nest this fragment one level deeper: a tab after every newline, then
    /// `\n<NAME>` … `\n</NAME>` around it.
    pub fn wrap(self, name: &str) -> XmlFragment {
        let inner = self.as_str().replace('\n', "\n\t");
        XmlFragment::raw(format!("\n<{name}>{inner}\n</{name}>"))
    }
}
