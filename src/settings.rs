//! Knobs which change how an [Editor](crate::Editor) behaves.

/// The textual form produced by [Editor::value](crate::Editor::value).
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum SemanticFormat {
    /// Functional notation, e.g. `apply(plus, cn(1), ci(x))`.
    Compact,

    /// Content MathML, e.g. `<apply><plus/><cn>1</cn><ci>x</ci></apply>`.
    MathMl,
}

#[derive(PartialEq, Eq, Debug, Clone)]
pub struct EditorSettings {
    /// Whether inserting a division pulls the preceding run of tokens into its numerator.
    pub collect_numerator: bool,

    pub format: SemanticFormat,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            collect_numerator: true,
            format: SemanticFormat::Compact,
        }
    }
}
