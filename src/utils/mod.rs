// Utilities Module
//
// Path and ignore-file helpers shared by the source collector.

/// Path conversion utilities (absolute -> relative Unix-style)
pub mod paths;

/// File ignore pattern utilities (.classgraphignore support)
pub mod ignore;
