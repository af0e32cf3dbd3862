// system-tests/tests/helpers/links.rs
// ============================================================================
// Module: Link Fixtures
// Description: Deterministic link lists for archiver scenarios.
// Purpose: Share the unreachable-localhost corpus across suites.
// ============================================================================

/// Port nothing listens on, so every fetch fails fast.
pub const UNREACHABLE_PORT: u16 = 123;

/// Returns `count` unreachable localhost page URLs, `test_0.html` upward.
pub fn unreachable_links(count: usize) -> Vec<String> {
    (0 .. count)
        .map(|idx| format!("http://localhost:{UNREACHABLE_PORT}/test_{idx}.html"))
        .collect()
}
