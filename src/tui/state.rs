//! Pure state transformations for the TUI (Functional Core)
//!
//! This module contains ONLY pure functions with no I/O.
//! The imperative shell (app.rs, events.rs) handles I/O and calls these.

// =============================================================================
// Navigation - Pure index calculations
// =============================================================================

/// Calculate new selected index after moving up
pub fn move_selection_up(current: usize) -> usize {
    current.saturating_sub(1)
}

/// Calculate new selected index after moving down
pub fn move_selection_down(current: usize, max: usize) -> usize {
    if max == 0 {
        0
    } else {
        (current + 1).min(max - 1)
    }
}

/// Calculate new selected index after page down
pub fn page_down(current: usize, page_size: usize, max: usize) -> usize {
    if max == 0 {
        0
    } else {
        (current + page_size).min(max - 1)
    }
}

/// Calculate new selected index after page up
pub fn page_up(current: usize, page_size: usize) -> usize {
    current.saturating_sub(page_size)
}

/// Calculate scroll offset to keep selection visible
pub fn calculate_scroll_offset(selected: usize, current_offset: usize, visible_rows: usize) -> usize {
    if visible_rows == 0 {
        return 0;
    }
    if selected < current_offset {
        selected
    } else if selected >= current_offset + visible_rows {
        selected.saturating_sub(visible_rows - 1)
    } else {
        current_offset
    }
}

/// Clamp selection index to valid range
pub fn clamp_selection(selected: usize, max: usize) -> usize {
    if max == 0 {
        0
    } else {
        selected.min(max - 1)
    }
}

// =============================================================================
// Category buttons
// =============================================================================

/// Next label after `current`, wrapping around
pub fn cycle_label(labels: &[String], current: &str) -> Option<String> {
    if labels.is_empty() {
        return None;
    }
    let next = match labels.iter().position(|l| l == current) {
        Some(i) => (i + 1) % labels.len(),
        None => 0,
    };
    Some(labels[next].clone())
}

/// Label for a digit key ('1' is the first button)
pub fn label_for_digit(labels: &[String], digit: char) -> Option<String> {
    let n = digit.to_digit(10)? as usize;
    if n == 0 {
        return None;
    }
    labels.get(n - 1).cloned()
}

/// Index in `options` one step forward or back from `current`, wrapping
pub fn step_wrapping(current: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        0
    } else if forward {
        (current + 1) % len
    } else {
        (current + len - 1) % len
    }
}

// =============================================================================
// Modal Scroll Calculations
// =============================================================================

/// Calculate scroll offset for modal (clamped to valid range)
pub fn scroll_modal(current: usize, delta: isize, total_lines: usize, visible: usize) -> usize {
    let max_scroll = total_lines.saturating_sub(visible);
    if delta >= 0 {
        (current + delta as usize).min(max_scroll)
    } else {
        current.saturating_sub(delta.unsigned_abs())
    }
}

// =============================================================================
// Tests
// =============================================================================
