//! Category templates and the named-placeholder renderer.
//!
//! Each block category has one template with named `{placeholder}` slots.
//! Rendering takes an explicit name/value map and fails fast when a
//! placeholder is left unfilled or a value has no matching slot, so template
//! drift is caught at build time rather than by the simulator's parser.
//! Literal braces are written `{{` and `}}`.

use crate::errors::TemplateError;

pub const INITIALIZE: &str = "\
initialize() {{

  // model type
  initializeSLiMModelType(\"{model_type}\");

  // config
  initializeRecombinationRate({recombination_rate});
  initializeMutationRate({mutation_rate});
  initializeTreeSeq();

  // MutationType init
  {mutations}

  // ElementType init
  {elements}

  // Chromosome (GenomicElement init)
  {chromosome}

  // constants
  {constants}

  // extra scripts
  {scripts}
}}
";

pub const FIRST: &str = "\
{comment}{time}first() {{ // executes at the start of each tick
    {scripts}
}}
";

pub const EARLY: &str = "\
{comment}{time}early() {{ // executes after offspring are generated
    {scripts}
}}
";

pub const FITNESS: &str = "\
{comment}{idx}fitness({mutation}) {{ // adjusts fitness calculation
    {scripts}
}}
";

pub const SURVIVAL: &str = "\
{comment}{idx}survival({population}) {{ // implements survival adjustments
    {scripts}
}}
";

pub const REPRODUCTION: &str = "\
{comment}reproduction({population}) {{ // generates offspring
    {scripts}
}}
";

pub const LATE: &str = "\
{comment}{time}late() {{ // executes after selection occurs
    {scripts}
}}
";

pub const CUSTOM: &str = "{comment}{scripts}\n";

/// Substitute `values` into `template`.
///
/// Every `{placeholder}` in the template must have exactly one value, and
/// every value must match a placeholder; either mismatch is an error.
pub fn render(template: &str, values: &[(&str, &str)]) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(template.len());
    let mut used = vec![false; values.len()];
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '{' => {
                let mut name = String::new();
                for c in chars.by_ref() {
                    if c == '}' {
                        break;
                    }
                    name.push(c);
                }
                match values.iter().position(|(n, _)| *n == name) {
                    Some(i) => {
                        used[i] = true;
                        out.push_str(values[i].1);
                    }
                    None => return Err(TemplateError::Unfilled(name)),
                }
            }
            _ => out.push(c),
        }
    }

    if let Some(i) = used.iter().position(|u| !u) {
        return Err(TemplateError::UnknownPlaceholder(values[i].0.to_string()));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_fills_placeholders() {
        let out = render("{a} and {b}", &[("a", "x"), ("b", "y")]).unwrap();
        assert_eq!(out, "x and y");
    }

    #[test]
    fn test_unfilled_placeholder_fails() {
        let err = render("{a} and {b}", &[("a", "x")]).unwrap_err();
        assert_eq!(err, TemplateError::Unfilled("b".to_string()));
    }

    #[test]
    fn test_unknown_value_fails() {
        let err = render("{a}", &[("a", "x"), ("c", "z")]).unwrap_err();
        assert_eq!(err, TemplateError::UnknownPlaceholder("c".to_string()));
    }

    #[test]
    fn test_escaped_braces() {
        let out = render("f() {{ {body} }}", &[("body", "x;")]).unwrap();
        assert_eq!(out, "f() { x; }");
    }

    #[test]
    fn test_repeated_placeholder() {
        let out = render("{p}-{p}", &[("p", "x")]).unwrap();
        assert_eq!(out, "x-x");
    }

    #[test]
    fn test_event_templates_have_expected_slots() {
        // Each template renders cleanly with its documented parameter set.
        render(
            EARLY,
            &[("comment", ""), ("time", ""), ("scripts", "x();")],
        )
        .unwrap();
        render(
            FITNESS,
            &[("comment", ""), ("idx", "s5 "), ("mutation", "m1"), ("scripts", "x();")],
        )
        .unwrap();
        render(
            SURVIVAL,
            &[("comment", ""), ("idx", "s1 "), ("population", "p1"), ("scripts", "x();")],
        )
        .unwrap();
        render(
            REPRODUCTION,
            &[("comment", ""), ("population", "p1"), ("scripts", "x();")],
        )
        .unwrap();
        render(CUSTOM, &[("comment", ""), ("scripts", "x();")]).unwrap();
    }
}
