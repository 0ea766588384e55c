//! Statistical helpers shared by the feature calculator and the training reports.
//!
//! - [`descriptive`]: mean, median, variance and standard deviation of a dataset
//! - [`counts`]: fixed-bin occurrence counts over discrete values
//!
//! # Examples
//!
//! ```
//! use senafit_stats::descriptive::DescriptiveStats;
//!
//! let stats = DescriptiveStats::new([4.0, 1.0, 3.0, 2.0]).unwrap();
//! assert_eq!(stats.median, 2.5);
//! assert_eq!(stats.mean, 2.5);
//! ```
//!
//! ```
//! use senafit_stats::counts::bin_counts;
//!
//! let counts = bin_counts([1_u8, 12, 15, 33], 4, |n| usize::from((n - 1) / 15));
//! assert_eq!(counts, vec![3, 0, 1, 0]);
//! ```

pub mod counts;
pub mod descriptive;
