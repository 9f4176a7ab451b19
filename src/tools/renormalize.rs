//! row normalization utilities


use num_traits::float::Float;

use ndarray::{Array2};


/// do a Row normalization, to get a transition matrix from a similarity matrix.
/// Rows with a null sum are left unchanged so no NaN can appear.
pub fn dense_row_normalization<F>(mat: &mut Array2<F>)
    where F: Float {
    //
    let (nb_row, _) = mat.dim();
    let mut nb_null_row = 0usize;
    for i in 0..nb_row {
        let mut row = mat.row_mut(i);
        let sum_i = row.sum();
        if sum_i > F::zero() {
            row.map_inplace(|x| *x = *x / sum_i);
        }
        else {
            nb_null_row += 1;
            log::trace!("dense_row_normalization null sum of row i {}", i);
        }
    }
    log::debug!("dense_row_normalization nb row with null sum : {}", nb_null_row);
}  // end of for dense_row_normalization


//===============================================================


mod tests {

    #[allow(unused)]
    use super::*;

    #[allow(dead_code)]
    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }


    #[test]
    fn test_full_row_normalization() {
        //
        log_init_test();
        //
        let mut dense =  ndarray::arr2( &
          [[ 1. , 0. , 0. , 0., 2. ],  // row 0
          [ 0. , 0. , 3. , 0. , 0. ],  // row 1
          [ 0. , 1. , 0. , 0. , 0. ],  // row 2
          [ 0. , 2. , 0. , 4. , 0. ]]  // row 3
        );
        dense_row_normalization(&mut dense);
        let check = num_traits::Float::abs(dense[[0,0]]- 1./3.);
        log::debug!("check (0,0): {}", check);
        assert!( check < 1.0E-10);
        //
        let check = num_traits::Float::abs(dense[[0,4]]- 2./3.);
        log::debug!("check (0,4): {}", check);
        assert!( check < 1.0E-10);
        //
        let check = num_traits::Float::abs(dense[[3,1]]- 1./3.);
        log::debug!("check (3,1): {}", check);
        assert!( check < 1.0E-10);
    } // end of test_full_row_normalization


    #[test]
    fn test_null_row_is_kept() {
        //
        log_init_test();
        //
        let mut dense =  ndarray::arr2( &
          [[ 0. , 0. , 0. ],
           [ 1. , 1. , 2. ],
           [ 0. , 0. , 0. ]]
        );
        dense_row_normalization(&mut dense);
        // null rows stay null, no NaN
        for j in 0..3 {
            assert_eq!(dense[[0,j]], 0.);
            assert_eq!(dense[[2,j]], 0.);
        }
        let check = num_traits::Float::abs(dense[[1,2]]- 0.5);
        assert!( check < 1.0E-10);
    } // end of test_null_row_is_kept

} // end of mod tests
