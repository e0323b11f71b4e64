//! Text processing utilities.
//!
//! This module contains utilities for processing and transforming text,
//! such as deriving anchors from labels and estimating wrapped heights.

use log::*;
use regex::Regex;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Derive an in-page anchor from a navigation label.
///
/// Whitespace is removed and the result lowercased, so "Web Designs" becomes
/// "#webdesigns".
///
/// # Arguments
/// * `label` - The label shown in the navigation bar
///
/// # Returns
/// The anchor, prefixed with `#`.
pub fn anchor_for_label(label: &str) -> String {
    let collapsed = match Regex::new(r"\s+") {
        Ok(re) => re.replace_all(label, "").to_string(),
        Err(e) => {
            warn!("Failed to compile whitespace pattern: {}", e);
            label.split_whitespace().collect()
        }
    };
    format!("#{}", collapsed.to_lowercase())
}

/// Count the lines `text` occupies when greedily word-wrapped at `width`
/// terminal columns. Words wider than a line are split between characters.
///
pub fn wrapped_height(text: &str, width: usize) -> usize {
    if width == 0 {
        return 0;
    }
    text.lines()
        .map(|line| {
            let mut lines = 1;
            let mut used = 0;
            for word in line.split_whitespace() {
                let len = word.width();
                let needed = if used == 0 { len } else { used + 1 + len };
                if needed <= width {
                    used = needed;
                    continue;
                }
                if len <= width {
                    lines += 1;
                    used = len;
                    continue;
                }
                if used > 0 {
                    lines += 1;
                    used = 0;
                }
                for ch in word.chars() {
                    let w = ch.width().unwrap_or(0);
                    if used > 0 && used + w > width {
                        lines += 1;
                        used = 0;
                    }
                    used += w;
                }
            }
            lines
        })
        .sum::<usize>()
        .max(1)
}

/// Shorten `text` to at most `width` columns, marking the cut with an
/// ellipsis.
///
pub fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let budget = width - 1;
    let mut used = 0;
    let mut kept = String::new();
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        kept.push(ch);
    }
    format!("{}…", kept)
}
