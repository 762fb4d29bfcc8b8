/// Evaluate a sum of power terms at `x`.
/// Each term is written as `coefficient => exponent`, accepts >=1 terms.
/// Exponents are integers and may be negative, in which case the caller is
/// responsible for keeping `x` away from zero.
macro_rules! power_series {
    ($x:expr; $head_coef:expr => $head_exp:expr $(, $coef:expr => $exp:expr )* $(,)?) => {{
        let x: f64 = $x;
        $head_coef * x.powi($head_exp) $(+ $coef * x.powi($exp))*
    }}
}
pub(crate) use power_series; // Make the macro visible
