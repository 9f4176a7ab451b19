//! node selection heuristics for the sampling loop


use anyhow::{anyhow};

use ndarray::{Array1};
use indexmap::IndexSet;

use rand::seq::index::sample;
use rand_xoshiro::Xoshiro256PlusPlus;

use super::params::{HEURISTIC_DEGREE, HEURISTIC_RANDOM};


/// selects nb_sampled distinct node indices among degrees.len() nodes.
/// With the "degree" heuristic the nodes of highest degree are returned, ties resolved
/// by the stable sort order on node rank. With the "random" heuristic the nodes are
/// drawn uniformly without replacement from the generator passed by the caller.
/// Any other tag is an error and aborts the refinement.
pub(crate) fn sample_nodes(degrees: &Array1<f64>, nb_sampled: usize, heuristic: &str,
        rng: &mut Xoshiro256PlusPlus) -> Result<IndexSet<usize>, anyhow::Error> {
    //
    let nb_nodes = degrees.len();
    assert!(nb_sampled <= nb_nodes);
    //
    let sampled_nodes = match heuristic {
        HEURISTIC_DEGREE => {
            // argsort by increasing degree, keep the upper tail
            let mut order: Vec<usize> = (0..nb_nodes).collect();
            order.sort_by(|&i, &j| degrees[i].partial_cmp(&degrees[j]).unwrap());
            order[nb_nodes - nb_sampled..].iter().copied().collect::<IndexSet<usize>>()
        },
        HEURISTIC_RANDOM => {
            sample(rng, nb_nodes, nb_sampled).into_iter().collect::<IndexSet<usize>>()
        },
        _ => {
            log::error!("sample_nodes received unknown heuristic : {}", heuristic);
            return Err(anyhow!("invalid heuristic : {}, use 'degree' or 'random'", heuristic));
        },
    };
    log::debug!("sample_nodes heuristic : {}, nb sampled : {}", heuristic, sampled_nodes.len());
    //
    Ok(sampled_nodes)
} // end of sample_nodes


//===============================================================


mod tests {

    #[allow(unused)]
    use super::*;

    #[allow(unused)]
    use rand_xoshiro::rand_core::SeedableRng;

    #[allow(dead_code)]
    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }


    #[test]
    fn test_select_by_degree() {
        //
        log_init_test();
        //
        let degrees = ndarray::arr1(&[1., 3., 2., 5.]);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(45679 as u64);
        let sampled = sample_nodes(&degrees, 2, HEURISTIC_DEGREE, &mut rng).unwrap();
        //
        assert_eq!(sampled.len(), 2);
        assert!(sampled.contains(&3));
        assert!(sampled.contains(&1));
    } // end of test_select_by_degree


    #[test]
    fn test_select_random_reproducible() {
        //
        log_init_test();
        //
        let degrees = ndarray::arr1(&[1.; 20]);
        let mut rng_1 = Xoshiro256PlusPlus::seed_from_u64(4664397);
        let mut rng_2 = Xoshiro256PlusPlus::seed_from_u64(4664397);
        let sampled_1 = sample_nodes(&degrees, 7, HEURISTIC_RANDOM, &mut rng_1).unwrap();
        let sampled_2 = sample_nodes(&degrees, 7, HEURISTIC_RANDOM, &mut rng_2).unwrap();
        //
        assert_eq!(sampled_1.len(), 7);
        assert_eq!(sampled_1, sampled_2);
        for node in sampled_1.iter() {
            assert!(*node < 20);
        }
    } // end of test_select_random_reproducible


    #[test]
    fn test_select_unknown_heuristic() {
        //
        log_init_test();
        //
        let degrees = ndarray::arr1(&[1., 2., 3.]);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(45679 as u64);
        let res = sample_nodes(&degrees, 2, "cosine", &mut rng);
        assert!(res.is_err());
    } // end of test_select_unknown_heuristic


    #[test]
    fn test_select_empty_sample() {
        //
        log_init_test();
        //
        let degrees = ndarray::arr1(&[1., 2., 3.]);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(45679 as u64);
        let sampled = sample_nodes(&degrees, 0, HEURISTIC_DEGREE, &mut rng).unwrap();
        assert!(sampled.is_empty());
    } // end of test_select_empty_sample

} // end of mod tests
