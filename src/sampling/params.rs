//! The module defines parameters for the sampled similarity refinement.
//!
//! The sampling rate gives the fraction of nodes whose similarity row is recomputed
//! at each iteration. Rows of nodes left out of the sample are reset to 0.


/// tag of the highest degree selection strategy
pub const HEURISTIC_DEGREE: &str = "degree";

/// tag of the uniform random selection strategy
pub const HEURISTIC_RANDOM: &str = "random";


#[derive(Debug, Clone)]
pub struct RefineParams {
    /// number of iterations of the sampling loop
    pub nb_iter: usize,
    /// fraction of nodes sampled at each iteration, in [0., 1.]
    pub sampling_rate: f64,
    /// node selection strategy, "degree" or "random"
    pub heuristic: String,
} // end of RefineParams


impl RefineParams {
    #[cfg_attr(doc, katexit::katexit)]
    ///
    /// The number of nodes sampled at each iteration is $\lfloor rate \cdot nbnodes \rfloor$
    /// so a rate of 1. recomputes every row of the similarity matrix at each iteration.
    ///
    pub fn new(nb_iter: usize, sampling_rate: f64, heuristic: String) -> Self {
        RefineParams { nb_iter, sampling_rate, heuristic }
    }

    //
    pub fn get_nb_iter(&self) -> usize { self.nb_iter }

    //
    pub fn get_sampling_rate(&self) -> f64 { self.sampling_rate }

    //
    pub fn get_heuristic(&self) -> &str { &self.heuristic }

} // end of RefineParams


impl Default for RefineParams {
    /// one iteration, full sampling, degree heuristic
    fn default() -> Self {
        RefineParams { nb_iter: 1, sampling_rate: 1., heuristic: String::from(HEURISTIC_DEGREE) }
    }
} // end of impl Default
