//! Cache statistics

/// Cache statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStatistics {
	/// Number of lookups that found a present key
	pub hits: u64,
	/// Number of lookups for absent keys
	pub misses: u64,
	/// Total number of lookups
	pub total_requests: u64,
	/// Current number of present keys
	pub entry_count: u64,
}

impl CacheStatistics {
	/// Calculate hit rate (0.0 to 1.0)
	///
	/// # Examples
	///
	/// ```
	/// use filebind_cache::CacheStatistics;
	///
	/// let stats = CacheStatistics {
	///     hits: 75,
	///     misses: 25,
	///     total_requests: 100,
	///     entry_count: 3,
	/// };
	///
	/// assert_eq!(stats.hit_rate(), 0.75);
	/// ```
	pub fn hit_rate(&self) -> f64 {
		if self.total_requests == 0 {
			0.0
		} else {
			self.hits as f64 / self.total_requests as f64
		}
	}

	/// Calculate miss rate (0.0 to 1.0)
	pub fn miss_rate(&self) -> f64 {
		if self.total_requests == 0 {
			0.0
		} else {
			self.misses as f64 / self.total_requests as f64
		}
	}
}
