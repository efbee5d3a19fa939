//! Critical value tables for the Student and Fisher distributions.
//!
//! Only two significance levels are tabulated: [`SUSPECTED_SIGNIFICANCE`]
//! (0.05) and [`CONFIRMED_SIGNIFICANCE`] (0.001). Degrees of freedom are looked
//! up with a ceiling rule: the value at the first breakpoint greater than or
//! equal to the requested degrees of freedom is returned, without
//! interpolation. The last breakpoint of every axis is `2^31 - 1`, which
//! stands for the unbounded tail of the table.
//!
//! The tables are immutable statics and safe to read from any thread.

use crate::errors::{AnomalyDetectionError, AnomalyResult};

/// Significance level separating Normal from Suspected verdicts.
pub const SUSPECTED_SIGNIFICANCE: f64 = 0.05;
/// Significance level separating Suspected from Confirmed verdicts.
pub const CONFIRMED_SIGNIFICANCE: f64 = 0.001;

/// Breakpoint standing in for "any larger degrees of freedom".
pub const UNBOUNDED_DEGREES_OF_FREEDOM: usize = i32::MAX as usize;

/// A distribution whose upper-tail critical value is tabulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Distribution {
    /// Student's t with the given degrees of freedom
    Student {
        /// Degrees of freedom
        degrees_of_freedom: usize,
    },
    /// Fisher–Snedecor F with numerator and denominator degrees of freedom
    Fisher {
        /// Numerator degrees of freedom
        numerator: usize,
        /// Denominator degrees of freedom
        denominator: usize,
    },
}

/// Critical value of `distribution` at `significance_level`.
///
/// # Example
/// ```rust
/// use wavelet_anomaly::distributions::{critical_value, Distribution};
///
/// let t = critical_value(Distribution::Student { degrees_of_freedom: 35 }, 0.05).unwrap();
/// assert_eq!(t, 2.02); // ceiling match at breakpoint 40
/// assert!(critical_value(Distribution::Student { degrees_of_freedom: 35 }, 0.01).is_err());
/// ```
pub fn critical_value(distribution: Distribution, significance_level: f64) -> AnomalyResult<f64> {
    match distribution {
        Distribution::Student { degrees_of_freedom } => {
            student_critical_value(degrees_of_freedom, significance_level)
        }
        Distribution::Fisher {
            numerator,
            denominator,
        } => fisher_critical_value(numerator, denominator, significance_level),
    }
}

/// Student t critical value for `degrees_of_freedom` at `significance_level`.
pub fn student_critical_value(
    degrees_of_freedom: usize,
    significance_level: f64,
) -> AnomalyResult<f64> {
    let table = if significance_level == SUSPECTED_SIGNIFICANCE {
        STUDENT_05
    } else if significance_level == CONFIRMED_SIGNIFICANCE {
        STUDENT_001
    } else {
        return Err(AnomalyDetectionError::UnsupportedSignificanceLevel {
            level: significance_level,
        });
    };

    let index = ceiling_index(&STUDENT_BREAKPOINTS, degrees_of_freedom)?;
    Ok(table[index])
}

/// Fisher F critical value for `(numerator, denominator)` degrees of freedom.
pub fn fisher_critical_value(
    numerator: usize,
    denominator: usize,
    significance_level: f64,
) -> AnomalyResult<f64> {
    let table = if significance_level == SUSPECTED_SIGNIFICANCE {
        &FISHER_05
    } else if significance_level == CONFIRMED_SIGNIFICANCE {
        &FISHER_001
    } else {
        return Err(AnomalyDetectionError::UnsupportedSignificanceLevel {
            level: significance_level,
        });
    };

    let column = ceiling_index(&FISHER_BREAKPOINTS, numerator)?;
    let row = ceiling_index(&FISHER_BREAKPOINTS, denominator)?;
    Ok(table[row][column])
}

/// Index of the first breakpoint `>= degrees_of_freedom`.
fn ceiling_index(breakpoints: &[usize], degrees_of_freedom: usize) -> AnomalyResult<usize> {
    let max = breakpoints.last().copied().unwrap_or(0);
    if degrees_of_freedom == 0 {
        return Err(AnomalyDetectionError::DegreesOfFreedomOutOfRange {
            degrees_of_freedom,
            max,
        });
    }

    // Breakpoints ascend, so the partition point is the ceiling match
    let index = breakpoints.partition_point(|&breakpoint| breakpoint < degrees_of_freedom);
    if index == breakpoints.len() {
        return Err(AnomalyDetectionError::DegreesOfFreedomOutOfRange {
            degrees_of_freedom,
            max,
        });
    }
    Ok(index)
}

// ============================================================================
// STUDENT TABLE
// ============================================================================

const STUDENT_LEN: usize = 43;

static STUDENT_BREAKPOINTS: [usize; STUDENT_LEN] = [
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26,
    27, 28, 29, 30, 40, 60, 120, 180, 240, 480, 960, 1920, 3840, 7680, 15360, 30720,
    UNBOUNDED_DEGREES_OF_FREEDOM,
];

static STUDENT_05: [f64; STUDENT_LEN] = [
    12.7, 4.3, 3.18, 2.78, 2.57, 2.45, 2.36, 2.31, 2.26, 2.23, 2.2, 2.18, 2.16, 2.14, 2.13, 2.12,
    2.11, 2.10, 2.09, 2.09, 2.08, 2.07, 2.07, 2.06, 2.06, 2.06, 2.05, 2.05, 2.05, 2.04, 2.02, 2.0,
    1.98, 1.96, 1.92, 1.86, 1.78, 1.65, 1.35, 1.05, 0.7, 0.5, 0.025,
];

static STUDENT_001: [f64; STUDENT_LEN] = [
    637.0, 31.6, 12.9, 8.61, 6.86, 5.96, 5.4, 5.04, 4.78, 4.59, 4.44, 4.32, 4.22, 4.14, 4.07,
    4.01, 3.95, 3.92, 3.88, 3.85, 3.82, 3.79, 3.77, 3.74, 3.72, 3.71, 3.69, 3.66, 3.66, 3.65,
    3.55, 3.46, 3.37, 3.28, 3.2, 3.05, 2.81, 2.3, 1.85, 1.55, 1.1, 0.9, 0.0005,
];

// ============================================================================
// FISHER TABLE
// ============================================================================

const FISHER_AXIS_LEN: usize = 27;

/// Shared breakpoints for both axes of the Fisher table.
static FISHER_BREAKPOINTS: [usize; FISHER_AXIS_LEN] = [
    1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 12, 15, 20, 24, 30, 40, 60, 120, 240, 480, 960, 1920, 3840,
    7680, 15360, 30720, UNBOUNDED_DEGREES_OF_FREEDOM,
];

// Rows are denominator degrees of freedom, columns numerator degrees of
// freedom; the unbounded breakpoint holds the df -> infinity limit.
static FISHER_05: [[f64; FISHER_AXIS_LEN]; FISHER_AXIS_LEN] = [
    // df2 = 1
    [
        161.448, 199.5, 215.707, 224.583, 230.162, 233.986, 236.768, 238.883, 240.543,
        241.882, 243.906, 245.95, 248.013, 249.052, 250.095, 251.143, 252.196, 253.253,
        253.783, 254.049, 254.182, 254.248, 254.281, 254.298, 254.306, 254.31, 254.314,
    ],
    // df2 = 2
    [
        18.5128, 19.0, 19.1643, 19.2468, 19.2964, 19.3295, 19.3532, 19.371, 19.3848,
        19.3959, 19.4125, 19.4291, 19.4458, 19.4541, 19.4624, 19.4707, 19.4791, 19.4874,
        19.4916, 19.4936, 19.4947, 19.4952, 19.4955, 19.4956, 19.4957, 19.4957, 19.4957,
    ],
    // df2 = 3
    [
        10.128, 9.55209, 9.27663, 9.11718, 9.01346, 8.94065, 8.88674, 8.84524, 8.8123,
        8.78552, 8.74464, 8.70287, 8.66019, 8.6385, 8.61658, 8.59441, 8.572, 8.54935,
        8.53793, 8.5322, 8.52933, 8.52789, 8.52717, 8.52681, 8.52663, 8.52654, 8.52645,
    ],
    // df2 = 4
    [
        7.70865, 6.94427, 6.59138, 6.38823, 6.25606, 6.16313, 6.09421, 6.04104, 5.99878,
        5.96437, 5.91173, 5.85781, 5.80254, 5.77439, 5.74588, 5.717, 5.68774, 5.65811,
        5.64314, 5.63562, 5.63185, 5.62996, 5.62902, 5.62854, 5.62831, 5.62819, 5.62807,
    ],
    // df2 = 5
    [
        6.60789, 5.78614, 5.40945, 5.19217, 5.05033, 4.95029, 4.87587, 4.81832, 4.77247,
        4.73506, 4.6777, 4.61876, 4.55813, 4.52715, 4.49571, 4.46379, 4.43138, 4.39845,
        4.38179, 4.37341, 4.36921, 4.3671, 4.36605, 4.36552, 4.36526, 4.36513, 4.365,
    ],
    // df2 = 6
    [
        5.98738, 5.14325, 4.75706, 4.53368, 4.38737, 4.28387, 4.20666, 4.1468, 4.09902,
        4.05996, 3.99994, 3.93806, 3.87419, 3.84146, 3.80816, 3.77429, 3.7398, 3.70467,
        3.68685, 3.67788, 3.67338, 3.67112, 3.66999, 3.66943, 3.66915, 3.66901, 3.66887,
    ],
    // df2 = 7
    [
        5.59145, 4.73741, 4.34683, 4.12031, 3.97152, 3.86597, 3.78704, 3.72573, 3.67667,
        3.63652, 3.57468, 3.51074, 3.44452, 3.41049, 3.37581, 3.34043, 3.30432, 3.26745,
        3.2487, 3.23925, 3.23451, 3.23213, 3.23094, 3.23035, 3.23005, 3.2299, 3.22975,
    ],
    // df2 = 8
    [
        5.31766, 4.45897, 4.06618, 3.83785, 3.6875, 3.58058, 3.50046, 3.4381, 3.38813,
        3.34716, 3.28394, 3.21841, 3.15032, 3.11524, 3.07941, 3.04278, 3.0053, 2.96692,
        2.94737, 2.93751, 2.93255, 2.93006, 2.92882, 2.9282, 2.92789, 2.92773, 2.92758,
    ],
    // df2 = 9
    [
        5.11736, 4.25649, 3.86255, 3.63309, 3.48166, 3.37375, 3.29275, 3.22958, 3.17889,
        3.13728, 3.07295, 3.0061, 2.93646, 2.90047, 2.86365, 2.82593, 2.78725, 2.74752,
        2.72725, 2.717, 2.71185, 2.70926, 2.70797, 2.70732, 2.707, 2.70684, 2.70668,
    ],
    // df2 = 10
    [
        4.9646, 4.10282, 3.70826, 3.47805, 3.32583, 3.21717, 3.13546, 3.07166, 3.02038,
        2.97824, 2.91298, 2.84502, 2.77402, 2.73725, 2.69955, 2.66086, 2.62108, 2.58012,
        2.55917, 2.54857, 2.54323, 2.54056, 2.53922, 2.53855, 2.53821, 2.53805, 2.53788,
    ],
    // df2 = 12
    [
        4.74723, 3.88529, 3.49029, 3.25917, 3.10588, 2.99612, 2.91336, 2.84857, 2.79638,
        2.75339, 2.68664, 2.61685, 2.54359, 2.50548, 2.46628, 2.42588, 2.38417, 2.34099,
        2.31881, 2.30756, 2.30189, 2.29905, 2.29762, 2.29691, 2.29656, 2.29638, 2.2962,
    ],
    // df2 = 15
    [
        4.54308, 3.68232, 3.28738, 3.05557, 2.90129, 2.79046, 2.70663, 2.6408, 2.58763,
        2.54372, 2.47531, 2.40345, 2.32754, 2.28783, 2.24679, 2.20428, 2.16011, 2.11406,
        2.09024, 2.07812, 2.072, 2.06893, 2.06739, 2.06662, 2.06623, 2.06604, 2.06585,
    ],
    // df2 = 20
    [
        4.35124, 3.49283, 3.09839, 2.86608, 2.71089, 2.59898, 2.51401, 2.44706, 2.39281,
        2.34788, 2.27758, 2.20327, 2.12416, 2.08245, 2.03909, 1.99382, 1.94636, 1.89632,
        1.87018, 1.85679, 1.85001, 1.8466, 1.84489, 1.84404, 1.84361, 1.84339, 1.84318,
    ],
    // df2 = 24
    [
        4.25968, 3.40283, 3.00879, 2.77629, 2.62065, 2.50819, 2.42263, 2.35508, 2.30024,
        2.25474, 2.18338, 2.10767, 2.02666, 1.98376, 1.93896, 1.89195, 1.84236, 1.78964,
        1.76189, 1.74761, 1.74037, 1.73672, 1.73489, 1.73397, 1.73351, 1.73328, 1.73305,
    ],
    // df2 = 30
    [
        4.17088, 3.31583, 2.92228, 2.68963, 2.53355, 2.42052, 2.33434, 2.26616, 2.2107,
        2.16458, 2.09206, 2.0148, 1.93165, 1.88736, 1.84087, 1.79179, 1.73957, 1.68345,
        1.65359, 1.63812, 1.63025, 1.62627, 1.62427, 1.62327, 1.62277, 1.62252, 1.62227,
    ],
    // df2 = 40
    [
        4.08475, 3.23173, 2.83875, 2.60597, 2.44947, 2.33585, 2.24902, 2.18017, 2.12403,
        2.07725, 2.00346, 1.92446, 1.83886, 1.79294, 1.74443, 1.6928, 1.63725, 1.57661,
        1.54381, 1.52665, 1.51785, 1.5134, 1.51116, 1.51003, 1.50947, 1.50919, 1.5089,
    ],
    // df2 = 60
    [
        4.00119, 3.15041, 2.75808, 2.52522, 2.36827, 2.25405, 2.16654, 2.09697, 2.0401,
        1.99259, 1.9174, 1.83644, 1.74798, 1.70012, 1.64914, 1.59427, 1.53431, 1.46727,
        1.43002, 1.41015, 1.39985, 1.3946, 1.39195, 1.39061, 1.38995, 1.38961, 1.38928,
    ],
    // df2 = 120
    [
        3.92012, 3.07178, 2.68017, 2.44724, 2.28985, 2.17501, 2.08677, 2.01643, 1.95876,
        1.91046, 1.8337, 1.7505, 1.65868, 1.60844, 1.55434, 1.4952, 1.42901, 1.35189,
        1.30668, 1.28148, 1.26802, 1.26104, 1.25747, 1.25567, 1.25477, 1.25431, 1.25386,
    ],
    // df2 = 240
    [
        3.8805, 3.03344, 2.64221, 2.40926, 2.25165, 2.13648, 2.04786, 1.97711, 1.91903,
        1.8703, 1.79267, 1.70823, 1.61449, 1.56284, 1.50685, 1.44499, 1.37456, 1.28962,
        1.2371, 1.2062, 1.18893, 1.17969, 1.17489, 1.17244, 1.17121, 1.17058, 1.16996,
    ],
    // df2 = 480
    [
        3.8609, 3.01451, 2.62348, 2.39051, 2.23279, 2.11746, 2.02865, 1.95769, 1.89938,
        1.85043, 1.77236, 1.68726, 1.59248, 1.54007, 1.48302, 1.4196, 1.34661, 1.2565,
        1.19832, 1.16219, 1.14086, 1.12891, 1.12251, 1.11919, 1.11749, 1.11663, 1.11576,
    ],
    // df2 = 960
    [
        3.85116, 3.0051, 2.61417, 2.3812, 2.22343, 2.10801, 2.0191, 1.94803, 1.88962,
        1.84055, 1.76225, 1.67681, 1.5815, 1.52868, 1.47107, 1.40682, 1.33241, 1.23924,
        1.17731, 1.13713, 1.11207, 1.09725, 1.08893, 1.08447, 1.08215, 1.08097, 1.07977,
    ],
    // df2 = 1920
    [
        3.84631, 3.00041, 2.60954, 2.37656, 2.21876, 2.1033, 2.01434, 1.94322, 1.88475,
        1.83562, 1.75721, 1.67159, 1.57601, 1.52299, 1.46509, 1.4004, 1.32524, 1.2304,
        1.16625, 1.12339, 1.09546, 1.07799, 1.06763, 1.06181, 1.05869, 1.05707, 1.0554,
    ],
    // df2 = 3840
    [
        3.84388, 2.99807, 2.60722, 2.37425, 2.21643, 2.10095, 2.01197, 1.94081, 1.88232,
        1.83316, 1.75469, 1.66899, 1.57326, 1.52014, 1.46209, 1.39718, 1.32164, 1.22592,
        1.16056, 1.11611, 1.08627, 1.06676, 1.05453, 1.04727, 1.04319, 1.041, 1.03868,
    ],
    // df2 = 7680
    [
        3.84267, 2.9969, 2.60607, 2.37309, 2.21526, 2.09977, 2.01078, 1.93961, 1.8811,
        1.83193, 1.75343, 1.66769, 1.57189, 1.51872, 1.4606, 1.39557, 1.31984, 1.22366,
        1.15767, 1.11234, 1.08138, 1.06051, 1.04684, 1.03825, 1.03315, 1.03028, 1.02711,
    ],
    // df2 = 15360
    [
        3.84206, 2.99632, 2.60549, 2.37251, 2.21468, 2.09918, 2.01018, 1.93901, 1.88049,
        1.83132, 1.7528, 1.66704, 1.57121, 1.518, 1.45985, 1.39477, 1.31894, 1.22253,
        1.15621, 1.11043, 1.07884, 1.05718, 1.04255, 1.03294, 1.0269, 1.02331, 1.01905,
    ],
    // df2 = 30720
    [
        3.84176, 2.99602, 2.6052, 2.37222, 2.21439, 2.09889, 2.00989, 1.93871, 1.88019,
        1.83101, 1.75249, 1.66671, 1.57086, 1.51765, 1.45947, 1.39436, 1.31848, 1.22196,
        1.15547, 1.10946, 1.07755, 1.05545, 1.04025, 1.02997, 1.0232, 1.01895, 1.01341,
    ],
    // df2 = unbounded
    [
        3.84146, 2.99573, 2.60491, 2.37193, 2.2141, 2.0986, 2.00959, 1.93841, 1.87989,
        1.8307, 1.75217, 1.66639, 1.57052, 1.51729, 1.4591, 1.39396, 1.31803, 1.22139,
        1.15474, 1.10849, 1.07624, 1.05367, 1.03783, 1.02669, 1.01884, 1.01331, 1.0,
    ],
];

static FISHER_001: [[f64; FISHER_AXIS_LEN]; FISHER_AXIS_LEN] = [
    // df2 = 1
    [
        405284.0, 499999.0, 540379.0, 562500.0, 576405.0, 585937.0, 592873.0, 598144.0, 602284.0,
        605621.0, 610668.0, 615764.0, 620908.0, 623497.0, 626099.0, 628712.0, 631337.0, 633972.0,
        635295.0, 635957.0, 636288.0, 636454.0, 636537.0, 636578.0, 636599.0, 636609.0, 636619.0,
    ],
    // df2 = 2
    [
        998.5, 999.0, 999.167, 999.25, 999.3, 999.333, 999.357, 999.375, 999.389,
        999.4, 999.417, 999.433, 999.45, 999.458, 999.467, 999.475, 999.483, 999.492,
        999.496, 999.498, 999.499, 999.499, 999.5, 999.5, 999.5, 999.5, 999.5,
    ],
    // df2 = 3
    [
        167.029, 148.5, 141.108, 137.1, 134.58, 132.847, 131.583, 130.619, 129.86,
        129.247, 128.316, 127.374, 126.418, 125.935, 125.449, 124.959, 124.466, 123.969,
        123.72, 123.594, 123.532, 123.5, 123.485, 123.477, 123.473, 123.471, 123.469,
    ],
    // df2 = 4
    [
        74.1373, 61.2456, 56.1772, 53.4358, 51.7116, 50.525, 49.6579, 48.9962, 48.4745,
        48.0526, 47.4118, 46.7612, 46.1003, 45.7658, 45.4286, 45.0886, 44.7457, 44.3998,
        44.2257, 44.1384, 44.0947, 44.0728, 44.0619, 44.0564, 44.0536, 44.0523, 44.0509,
    ],
    // df2 = 5
    [
        47.1808, 37.1223, 33.2025, 31.085, 29.7524, 28.8344, 28.1626, 27.6495, 27.2445,
        26.9166, 26.418, 25.9108, 25.3946, 25.1329, 24.8688, 24.602, 24.3326, 24.0605,
        23.9233, 23.8545, 23.82, 23.8027, 23.7941, 23.7898, 23.7876, 23.7865, 23.7854,
    ],
    // df2 = 6
    [
        35.5075, 27.0, 23.7033, 21.9235, 20.8027, 20.0297, 19.4634, 19.0303, 18.6882,
        18.4109, 17.9888, 17.5587, 17.1201, 16.8974, 16.6722, 16.4445, 16.2143, 15.9812,
        15.8636, 15.8045, 15.7749, 15.7601, 15.7527, 15.749, 15.7471, 15.7462, 15.7453,
    ],
    // df2 = 7
    [
        29.2452, 21.689, 18.7723, 17.198, 16.2058, 15.5208, 15.0186, 14.634, 14.3299,
        14.0833, 13.7073, 13.3237, 12.9316, 12.7322, 12.5304, 12.326, 12.1189, 11.909,
        11.8029, 11.7496, 11.7228, 11.7094, 11.7027, 11.6994, 11.6977, 11.6969, 11.696,
    ],
    // df2 = 8
    [
        25.4148, 18.4937, 15.8295, 14.3916, 13.4847, 12.858, 12.398, 12.0455, 11.7665,
        11.5401, 11.1945, 10.8413, 10.4797, 10.2954, 10.1087, 9.91936, 9.72721, 9.53208,
        9.43333, 9.38364, 9.35872, 9.34624, 9.34, 9.33687, 9.33531, 9.33453, 9.33375,
    ],
    // df2 = 9
    [
        22.8571, 16.3871, 13.9018, 12.5603, 11.7137, 11.1281, 10.6979, 10.368, 10.1066,
        9.8943, 9.57001, 9.23807, 8.89761, 8.72386, 8.54756, 8.36852, 8.18654, 8.00141,
        7.90757, 7.86032, 7.83661, 7.82473, 7.81879, 7.81582, 7.81433, 7.81359, 7.81284,
    ],
    // df2 = 10
    [
        21.0396, 14.9054, 12.5527, 11.2828, 10.4807, 9.92561, 9.51745, 9.20415, 8.95577,
        8.75387, 8.44519, 8.1288, 7.80375, 7.6376, 7.4688, 7.29714, 7.1224, 6.94429,
        6.85388, 6.80831, 6.78544, 6.77397, 6.76824, 6.76537, 6.76393, 6.76322, 6.7625,
    ],
    // df2 = 12
    [
        18.6433, 12.9737, 10.8042, 9.63273, 8.89211, 8.37881, 8.00087, 7.71035, 7.47974,
        7.29203, 7.00458, 6.70922, 6.40481, 6.24875, 6.08984, 5.9278, 5.76233, 5.59306,
        5.50686, 5.46335, 5.44148, 5.43052, 5.42503, 5.42229, 5.42092, 5.42023, 5.41954,
    ],
    // df2 = 15
    [
        16.5874, 11.3391, 9.33525, 8.25268, 7.56739, 7.09168, 6.74082, 6.47068, 6.25588,
        6.08078, 5.81206, 5.53508, 5.24842, 5.1009, 4.95019, 4.79593, 4.6377, 4.47496,
        4.39169, 4.34954, 4.32833, 4.31769, 4.31236, 4.30969, 4.30836, 4.30769, 4.30702,
    ],
    // df2 = 20
    [
        14.8188, 9.95262, 8.09838, 7.09603, 6.46056, 6.01861, 5.69199, 5.43999, 5.23923,
        5.07525, 4.82292, 4.56176, 4.28997, 4.14933, 4.00499, 3.85644, 3.70302, 3.54385,
        3.46177, 3.42003, 3.39897, 3.38839, 3.38309, 3.38044, 3.37911, 3.37845, 3.37778,
    ],
    // df2 = 24
    [
        14.028, 9.33935, 7.55446, 6.58924, 5.97679, 5.5504, 5.23491, 4.99122, 4.79684,
        4.6379, 4.39292, 4.13872, 3.87324, 3.73538, 3.59346, 3.44683, 3.29464, 3.13574,
        3.05329, 3.01121, 2.98994, 2.97924, 2.97388, 2.97119, 2.96985, 2.96918, 2.9685,
    ],
    // df2 = 30
    [
        13.293, 8.7734, 7.05446, 6.12452, 5.53391, 5.12226, 4.81729, 4.58142, 4.39304,
        4.23879, 4.00062, 3.75275, 3.49278, 3.3572, 3.21709, 3.07161, 2.91963, 2.75953,
        2.67573, 2.63272, 2.61092, 2.59993, 2.59442, 2.59166, 2.59028, 2.58959, 2.5889,
    ],
    // df2 = 40
    [
        12.6094, 8.25075, 6.59454, 5.69813, 5.12826, 4.73057, 4.43555, 4.20704, 4.02426,
        3.87439, 3.64247, 3.40028, 3.14499, 3.01113, 2.87211, 2.72682, 2.57367, 2.41025,
        2.32355, 2.27866, 2.25578, 2.24422, 2.23842, 2.2355, 2.23405, 2.23332, 2.23259,
    ],
    // df2 = 60
    [
        11.973, 7.76776, 6.17123, 5.3067, 4.75652, 4.37205, 4.08642, 3.86483, 3.6873,
        3.54148, 3.31528, 3.0781, 2.82655, 2.69376, 2.55494, 2.40857, 2.25227, 2.0821,
        1.9897, 1.94107, 1.91603, 1.90331, 1.8969, 1.89369, 1.89207, 1.89127, 1.89046,
    ],
    // df2 = 120
    [
        11.3802, 7.32111, 5.78137, 4.94715, 4.41568, 4.04375, 3.76698, 3.55188, 3.37924,
        3.23716, 3.01615, 2.78328, 2.53442, 2.40189, 2.26213, 2.11284, 1.95021, 1.76674,
        1.66231, 1.60514, 1.5749, 1.55929, 1.55134, 1.54734, 1.54533, 1.54432, 1.54331,
    ],
    // df2 = 240
    [
        11.0991, 7.11045, 5.59807, 4.77846, 4.25598, 3.89007, 3.61754, 3.40555, 3.23522,
        3.0949, 2.87628, 2.64529, 2.39732, 2.26455, 2.12375, 1.97204, 1.80429, 1.60932,
        1.49285, 1.42584, 1.38889, 1.36927, 1.35911, 1.35394, 1.35133, 1.35002, 1.3487,
    ],
    // df2 = 480
    [
        10.9621, 7.00813, 5.50918, 4.69673, 4.17867, 3.81571, 3.54526, 3.33478, 3.16558,
        3.02611, 2.80863, 2.57851, 2.33086, 2.19787, 2.05636, 1.90311, 1.7321, 1.52913,
        1.40304, 1.32673, 1.28242, 1.25786, 1.24477, 1.23798, 1.23453, 1.23278, 1.23102,
    ],
    // df2 = 960
    [
        10.8946, 6.9577, 5.46541, 4.65651, 4.14063, 3.77914, 3.50971, 3.29998, 3.13133,
        2.99228, 2.77536, 2.54565, 2.29813, 2.165, 2.0231, 1.86898, 1.6961, 1.48831,
        1.35574, 1.27215, 1.22103, 1.19114, 1.17449, 1.1656, 1.16099, 1.15864, 1.15625,
    ],
    // df2 = 1920
    [
        10.861, 6.93267, 5.44369, 4.63656, 4.12177, 3.761, 3.49209, 3.28272, 3.11435,
        2.97551, 2.75886, 2.52936, 2.28189, 2.14868, 2.00657, 1.85199, 1.67811, 1.46766,
        1.33123, 1.24278, 1.18636, 1.15157, 1.13112, 1.1197, 1.11359, 1.11041, 1.10715,
    ],
    // df2 = 3840
    [
        10.8443, 6.9202, 5.43287, 4.62662, 4.11237, 3.75197, 3.48331, 3.27413, 3.10589,
        2.96716, 2.75065, 2.52125, 2.27381, 2.14055, 1.99833, 1.84351, 1.66911, 1.45726,
        1.31871, 1.22739, 1.16744, 1.12885, 1.10491, 1.09078, 1.08287, 1.07863, 1.07416,
    ],
    // df2 = 7680
    [
        10.8359, 6.91397, 5.42747, 4.62166, 4.10768, 3.74746, 3.47893, 3.26984, 3.10168,
        2.96299, 2.74655, 2.5172, 2.26977, 2.13649, 1.99421, 1.83928, 1.66462, 1.45204,
        1.31237, 1.21947, 1.15745, 1.11633, 1.08969, 1.07308, 1.06325, 1.05774, 1.05167,
    ],
    // df2 = 15360
    [
        10.8317, 6.91086, 5.42477, 4.61918, 4.10534, 3.74521, 3.47674, 3.2677, 3.09957,
        2.96091, 2.7445, 2.51517, 2.26775, 2.13447, 1.99216, 1.83716, 1.66237, 1.44943,
        1.30919, 1.21546, 1.15229, 1.10968, 1.08124, 1.06272, 1.05114, 1.04427, 1.03615,
    ],
    // df2 = 30720
    [
        10.8297, 6.90931, 5.42343, 4.61794, 4.10417, 3.74408, 3.47565, 3.26663, 3.09852,
        2.95987, 2.74348, 2.51416, 2.26674, 2.13345, 1.99113, 1.83611, 1.66124, 1.44812,
        1.30759, 1.21343, 1.14966, 1.10624, 1.07674, 1.05695, 1.04401, 1.03589, 1.02538,
    ],
    // df2 = unbounded
    [
        10.8276, 6.90776, 5.42208, 4.61671, 4.103, 3.74296, 3.47456, 3.26556, 3.09746,
        2.95883, 2.74246, 2.51315, 2.26574, 2.13244, 1.9901, 1.83505, 1.66012, 1.44681,
        1.30599, 1.2114, 1.14701, 1.10271, 1.07201, 1.05061, 1.03563, 1.02512, 1.0,
    ],
];

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use statrs::distribution::{ContinuousCDF, FisherSnedecor};

    #[test]
    fn test_breakpoints_strictly_ascend() {
        assert!(STUDENT_BREAKPOINTS.windows(2).all(|w| w[0] < w[1]));
        assert!(FISHER_BREAKPOINTS.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(STUDENT_BREAKPOINTS[STUDENT_LEN - 1], UNBOUNDED_DEGREES_OF_FREEDOM);
        assert_eq!(FISHER_BREAKPOINTS[FISHER_AXIS_LEN - 1], UNBOUNDED_DEGREES_OF_FREEDOM);
    }

    #[test]
    fn test_student_exact_breakpoints() {
        assert_eq!(student_critical_value(1, SUSPECTED_SIGNIFICANCE).unwrap(), 12.7);
        assert_eq!(student_critical_value(9, SUSPECTED_SIGNIFICANCE).unwrap(), 2.26);
        assert_eq!(student_critical_value(10, SUSPECTED_SIGNIFICANCE).unwrap(), 2.23);
        assert_eq!(student_critical_value(9, CONFIRMED_SIGNIFICANCE).unwrap(), 4.78);
        assert_eq!(student_critical_value(30, CONFIRMED_SIGNIFICANCE).unwrap(), 3.65);
    }

    #[test]
    fn test_student_ceiling_lookup() {
        // Between 30 and 40 the value of breakpoint 40 applies, not 30 or a blend
        assert_eq!(student_critical_value(31, SUSPECTED_SIGNIFICANCE).unwrap(), 2.02);
        assert_eq!(student_critical_value(39, SUSPECTED_SIGNIFICANCE).unwrap(), 2.02);
        assert_eq!(student_critical_value(41, CONFIRMED_SIGNIFICANCE).unwrap(), 3.46);
        assert_eq!(student_critical_value(121, SUSPECTED_SIGNIFICANCE).unwrap(), 1.96);
        assert_eq!(student_critical_value(30721, SUSPECTED_SIGNIFICANCE).unwrap(), 0.025);
    }

    #[test]
    fn test_student_rejects_out_of_range() {
        assert!(matches!(
            student_critical_value(0, SUSPECTED_SIGNIFICANCE),
            Err(AnomalyDetectionError::DegreesOfFreedomOutOfRange { degrees_of_freedom: 0, .. })
        ));
        match student_critical_value(usize::MAX, SUSPECTED_SIGNIFICANCE) {
            Err(AnomalyDetectionError::DegreesOfFreedomOutOfRange { max, .. }) => {
                assert_eq!(max, UNBOUNDED_DEGREES_OF_FREEDOM);
            }
            other => panic!("Expected DegreesOfFreedomOutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_unsupported_significance_level() {
        for level in [0.01, 0.1, 0.0, f64::NAN] {
            assert!(matches!(
                student_critical_value(10, level),
                Err(AnomalyDetectionError::UnsupportedSignificanceLevel { .. })
            ));
            assert!(matches!(
                fisher_critical_value(10, 10, level),
                Err(AnomalyDetectionError::UnsupportedSignificanceLevel { .. })
            ));
        }
    }

    #[test]
    fn test_fisher_known_values() {
        assert_approx_eq!(fisher_critical_value(1, 1, SUSPECTED_SIGNIFICANCE).unwrap(), 161.448, 1e-3);
        assert_approx_eq!(fisher_critical_value(10, 10, SUSPECTED_SIGNIFICANCE).unwrap(), 2.97824, 1e-5);
        assert_approx_eq!(fisher_critical_value(10, 10, CONFIRMED_SIGNIFICANCE).unwrap(), 8.75, 1e-2);
        assert_eq!(
            fisher_critical_value(
                UNBOUNDED_DEGREES_OF_FREEDOM,
                UNBOUNDED_DEGREES_OF_FREEDOM,
                SUSPECTED_SIGNIFICANCE
            )
            .unwrap(),
            1.0
        );
    }

    #[test]
    fn test_fisher_ceiling_on_both_axes() {
        let exact = fisher_critical_value(12, 10, SUSPECTED_SIGNIFICANCE).unwrap();
        assert_eq!(fisher_critical_value(11, 10, SUSPECTED_SIGNIFICANCE).unwrap(), exact);

        let exact = fisher_critical_value(10, 12, SUSPECTED_SIGNIFICANCE).unwrap();
        assert_eq!(fisher_critical_value(10, 11, SUSPECTED_SIGNIFICANCE).unwrap(), exact);

        // Axes are not interchangeable
        assert_ne!(
            fisher_critical_value(1, 10, SUSPECTED_SIGNIFICANCE).unwrap(),
            fisher_critical_value(10, 1, SUSPECTED_SIGNIFICANCE).unwrap()
        );

        assert!(fisher_critical_value(0, 10, SUSPECTED_SIGNIFICANCE).is_err());
        assert!(fisher_critical_value(10, usize::MAX, CONFIRMED_SIGNIFICANCE).is_err());
    }

    #[test]
    fn test_fisher_table_matches_exact_quantiles() {
        for (alpha, table) in [
            (SUSPECTED_SIGNIFICANCE, &FISHER_05),
            (CONFIRMED_SIGNIFICANCE, &FISHER_001),
        ] {
            for (row, &denominator) in FISHER_BREAKPOINTS.iter().enumerate() {
                for (column, &numerator) in FISHER_BREAKPOINTS.iter().enumerate() {
                    if numerator > 120 || denominator > 120 {
                        continue;
                    }
                    let distribution =
                        FisherSnedecor::new(numerator as f64, denominator as f64).unwrap();
                    let tail = 1.0 - distribution.cdf(table[row][column]);
                    assert!(
                        (tail - alpha).abs() < alpha * 0.01,
                        "F({}, {}) at {}: tail probability {} of {}",
                        numerator,
                        denominator,
                        alpha,
                        tail,
                        table[row][column]
                    );
                }
            }
        }
    }

    #[test]
    fn test_confirmed_limits_exceed_suspected_limits() {
        for &df in STUDENT_BREAKPOINTS.iter() {
            assert!(
                student_critical_value(df, CONFIRMED_SIGNIFICANCE).unwrap()
                    > student_critical_value(df, SUSPECTED_SIGNIFICANCE).unwrap()
                    || df == UNBOUNDED_DEGREES_OF_FREEDOM
            );
        }
        for &d1 in FISHER_BREAKPOINTS.iter().take(FISHER_AXIS_LEN - 1) {
            for &d2 in FISHER_BREAKPOINTS.iter().take(FISHER_AXIS_LEN - 1) {
                assert!(
                    fisher_critical_value(d1, d2, CONFIRMED_SIGNIFICANCE).unwrap()
                        > fisher_critical_value(d1, d2, SUSPECTED_SIGNIFICANCE).unwrap()
                );
            }
        }
    }

    #[test]
    fn test_critical_value_dispatch() {
        assert_eq!(
            critical_value(Distribution::Student { degrees_of_freedom: 5 }, SUSPECTED_SIGNIFICANCE)
                .unwrap(),
            2.57
        );
        assert_eq!(
            critical_value(
                Distribution::Fisher {
                    numerator: 4,
                    denominator: 6
                },
                CONFIRMED_SIGNIFICANCE
            )
            .unwrap(),
            fisher_critical_value(4, 6, CONFIRMED_SIGNIFICANCE).unwrap()
        );
    }
}
