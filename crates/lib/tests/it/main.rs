/*! Integration tests for Arbor.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - tree: Tests for documents, paths, array and group operations, hooks and coercion
 * - format: Tests for the Formatter trait and the JSON formatter
 * - sync: Tests for the FileSyncer and its background timer
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("arbor=info".parse().unwrap()))
        .with_test_writer()
        .try_init();
}

mod format;
mod helpers;
mod tree;
