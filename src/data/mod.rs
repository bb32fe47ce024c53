/// Data layer: measurement-file parsing and the in-memory series model.
///
/// Architecture:
/// ```text
///  results/*.out   (`<x>=<y>` per line, `#` comments)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Series (skip malformed lines)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ SeriesSet  │  Vec<Series>, combined bounds
///   └───────────┘
///        │
///        ▼
///   render (png/svg)  or  viewer window
/// ```

pub mod loader;
pub mod model;
