//! Public suffix set.
//!
//! Holds the known public suffixes as literal strings:
//! - O(1) membership lookup using HashSet
//! - `/` comment lines and blank lines are dropped at load time
//! - `*.` wildcard and `!` exception entries are kept verbatim, not expanded
//!
//! ## Example
//!
//! ```
//! use domain_suffix::suffix::SuffixSet;
//!
//! let set = SuffixSet::from_lines(["// comment", "cn", "com.cn", ""]);
//!
//! assert!(set.contains("com.cn"));
//! assert!(!set.contains("1.com.cn"));
//! assert_eq!(set.len(), 2);
//! ```

mod set;

pub use set::SuffixSet;
