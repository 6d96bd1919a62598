//! Content MathML output.

use core::fmt::Write;

use alloc::string::String;

use super::Semantic;

/// Appends the content MathML for `value` to `out`. No `<math>` wrapper is added.
pub fn write(value: &Semantic, out: &mut String) {
    // Writing to a String can't fail
    let _ = write_inner(value, out);
}

fn write_inner(value: &Semantic, out: &mut String) -> core::fmt::Result {
    match value {
        Semantic::Number(n) => write!(out, "<cn>{}</cn>", n),
        Semantic::Identifier(c) => write!(out, "<ci>{}</ci>", c),
        Semantic::Constant(c) => write!(out, "<{}/>", c.tag()),
        Semantic::Degree(inner) => {
            out.push_str("<degree>");
            write_inner(inner, out)?;
            out.push_str("</degree>");
            Ok(())
        }
        Semantic::Apply(op, args) => {
            write!(out, "<apply><{}/>", op.tag())?;
            for arg in args {
                write_inner(arg, out)?;
            }
            out.push_str("</apply>");
            Ok(())
        }
    }
}
