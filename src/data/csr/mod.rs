pub use graph::CsrGraph;

mod graph;
