//! Search mask matching
//!
//! Masks use `*` for any run of characters (including none) and `?` for
//! exactly one character. Matching ignores ASCII case, like the archive's
//! own name lookups.

/// Mask that matches every entry
pub const MATCH_ALL: &str = "*";

/// Check whether `name` matches `mask`
pub fn matches_mask(name: &str, mask: &str) -> bool {
    if mask == MATCH_ALL {
        return true;
    }

    let name: Vec<char> = name.chars().collect();
    let mask: Vec<char> = mask.chars().collect();

    let (mut n, mut m) = (0, 0);
    // Position of the last `*` in the mask and the name index it resumed at
    let mut backtrack: Option<(usize, usize)> = None;

    while n < name.len() {
        if m < mask.len() && mask[m] == '*' {
            backtrack = Some((m, n));
            m += 1;
        } else if m < mask.len() && (mask[m] == '?' || mask[m].eq_ignore_ascii_case(&name[n])) {
            n += 1;
            m += 1;
        } else if let Some((star, resume)) = backtrack {
            m = star + 1;
            n = resume + 1;
            backtrack = Some((star, resume + 1));
        } else {
            return false;
        }
    }

    mask[m..].iter().all(|&c| c == '*')
}
