/// Data layer: core types, loading, filtering, prediction and ranking.
///
/// Architecture:
/// ```text
///  .csv / .parquet / .json        .json / .bin
///        │                             │
///        ▼                             ▼
///   ┌──────────┐                ┌────────────┐
///   │  loader   │ → Dataset      │ regression │ → LinearModel
///   └──────────┘                └────────────┘
///        │                             │
///        ▼                             │
///   ┌──────────┐                       │
///   │  filter   │ region selection → visible indices
///   └──────────┘                       │
///        │                             ▼
///        ├──────────────────────► ┌──────────┐
///        │                        │ predict  │  fit line / simulation
///        ▼                        └──────────┘
///   ┌──────────┐
///   │   rank    │  top 10 by business count
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod predict;
pub mod rank;
pub mod regression;
