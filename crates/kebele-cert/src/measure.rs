//! Text measurement against the built-in Helvetica metrics.
//!
//! Widths are the AFM advance widths (per mille of the font size) for the
//! printable ASCII range. Measuring here, in the same millimetre space the
//! page uses, is what lets the layout engine center a measured title and
//! apply the wrap rule without asking the PDF backend.

const PT_TO_MM: f64 = 25.4 / 72.0;

/// Advance widths for Helvetica, chars 0x20..=0x7E.
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
  278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
  556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
  1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
  667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
  333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
  556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Advance widths for Helvetica-Bold, chars 0x20..=0x7E.
#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
  278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
  556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
  975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
  667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
  333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
  611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Characters outside the table (accented names, Ge'ez punctuation carried
/// through transliteration) measure as an average-width glyph.
const FALLBACK: u16 = 600;

fn advance(c: char, bold: bool) -> u16 {
  let table = if bold { &HELVETICA_BOLD } else { &HELVETICA };
  let code = c as u32;
  match code {
    0x20..=0x7E => table[(code - 0x20) as usize],
    _ => FALLBACK,
  }
}

/// Width of `text` in millimetres at `size` points.
pub fn text_width(text: &str, size: f64, bold: bool) -> f64 {
  let mille: u64 = text.chars().map(|c| advance(c, bold) as u64).sum();
  mille as f64 / 1000.0 * size * PT_TO_MM
}

/// Greedy word wrap against a width budget in millimetres.
///
/// Always yields at least one line. A single word wider than the budget is
/// hard-split at character granularity rather than overflowing the column.
pub fn wrap(text: &str, max_width: f64, size: f64, bold: bool) -> Vec<String> {
  let mut lines: Vec<String> = Vec::new();
  let mut current = String::new();

  for word in text.split_whitespace() {
    let candidate = if current.is_empty() {
      word.to_string()
    } else {
      format!("{current} {word}")
    };

    if text_width(&candidate, size, bold) <= max_width {
      current = candidate;
      continue;
    }

    if !current.is_empty() {
      lines.push(std::mem::take(&mut current));
    }

    // The word alone may still be too wide.
    if text_width(word, size, bold) <= max_width {
      current = word.to_string();
    } else {
      for c in word.chars() {
        let mut widened = current.clone();
        widened.push(c);
        if !current.is_empty() && text_width(&widened, size, bold) > max_width {
          lines.push(std::mem::take(&mut current));
          current.push(c);
        } else {
          current = widened;
        }
      }
    }
  }

  if !current.is_empty() || lines.is_empty() {
    lines.push(current);
  }
  lines
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn width_grows_with_text() {
    let short = text_width("Kebele", 11.0, false);
    let long = text_width("Kebele Administration", 11.0, false);
    assert!(long > short);
    assert!(short > 0.0);
  }

  #[test]
  fn bold_is_at_least_as_wide() {
    let s = "Resident Details";
    assert!(text_width(s, 11.0, true) >= text_width(s, 11.0, false));
  }

  #[test]
  fn narrow_glyphs_measure_narrower() {
    assert!(text_width("iiii", 11.0, false) < text_width("MMMM", 11.0, false));
  }

  #[test]
  fn short_text_stays_on_one_line() {
    assert_eq!(wrap("Abdi Tolera", 120.0, 11.0, false), vec!["Abdi Tolera"]);
  }

  #[test]
  fn empty_text_is_one_empty_line() {
    assert_eq!(wrap("", 120.0, 11.0, false), vec![String::new()]);
  }

  #[test]
  fn wrapped_lines_each_fit_the_budget() {
    let text = "House 114, Kebele 05, Adama Woreda, East Shewa Zone, Oromia Region, Ethiopia";
    let budget = 40.0;
    let lines = wrap(text, budget, 11.0, false);
    assert!(lines.len() > 1);
    for line in &lines {
      assert!(
        text_width(line, 11.0, false) <= budget,
        "line overflows: {line:?}"
      );
    }
    // No content lost.
    assert_eq!(lines.join(" "), text);
  }

  #[test]
  fn oversized_word_is_hard_split() {
    let word = "a".repeat(200);
    let lines = wrap(&word, 30.0, 11.0, false);
    assert!(lines.len() > 1);
    for line in &lines {
      assert!(text_width(line, 11.0, false) <= 30.0);
    }
    assert_eq!(lines.concat(), word);
  }
}
