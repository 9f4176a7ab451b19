//! compute node degrees from a dense adjacency matrix



use ndarray::{Array1, Array2, Axis};


/// returns the weighted degree of each node, i.e the sum of its adjacency row.
/// Self loops, if present, count in the degree as they do in the row sum.
pub fn get_weighted_degrees(adj_matrix: &Array2<f64>) -> Array1<f64> {
    adj_matrix.sum_axis(Axis(1))
} // end of get_weighted_degrees


//===============================================================


mod tests {

    #[allow(unused)]
    use super::*;

    #[allow(dead_code)]
    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }


    #[test]
    fn test_weighted_degrees() {
        //
        log_init_test();
        //
        let adj = ndarray::arr2(&
          [[ 0. , 1. , 0. , 0. ],
           [ 1. , 0. , 1. , 0. ],
           [ 0. , 1. , 0. , 2. ],
           [ 0. , 0. , 2. , 2. ]]
        );
        let degrees = get_weighted_degrees(&adj);
        assert_eq!(degrees, ndarray::arr1(&[1., 2., 3., 4.]));
    } // end of test_weighted_degrees

} // end of mod tests
