pub mod ops_merge;
