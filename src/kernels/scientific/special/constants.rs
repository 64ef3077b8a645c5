// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Gamma Constants Module** - *Coefficient Tables for the Gamma Family*
//!
//! Hard-coded coefficients and thresholds for the Lanczos gamma approximation,
//! the incomplete gamma evaluators and the inverse solver seed.

use crate::config::{TEMME_ORDERS, TEMME_TERMS};

// ******** Lanczos approximation ***************************************/

/// Lanczos auxiliary parameter `r` for the Godfrey coefficient set.
///
/// Pairs with [`GAMMA_DK`]; the shifted base of the power term is `x - 0.5 + r`.
pub(crate) const GAMMA_R: f64 = 10.900511;

/// Lanczos approximation coefficients (Godfrey, 11 terms).
///
/// Partial-fraction coefficients of the Lanczos series
/// `d0 + Σ dk / (x + k - 1)`, accurate to about 1e-15 relative across the
/// positive real axis, so ln Γ never needs a Stirling switch-over for large x.
pub(crate) const GAMMA_DK: [f64; 11] = [
    2.48574089138753565546e-5,
    1.05142378581721974210,
    -3.45687097222016235469,
    4.51227709466894823700,
    -2.98285225323576655721,
    1.05639711577126713077,
    -1.95428773191645869583e-1,
    1.70970543404441224307e-2,
    -5.71926117404305781283e-4,
    4.63399473359905636708e-6,
    -2.71994908488607703910e-9,
];

/// `ln(2 √(e/π))`, the log-scale prefactor of the Lanczos sum.
pub(crate) const LN_2_SQRT_E_OVER_PI: f64 =
    0.6207822376352452223455184457816472122518527279025978;

/// `2 √(e/π)`, the linear-scale prefactor of the Lanczos sum.
pub(crate) const TWO_SQRT_E_OVER_PI: f64 =
    1.8603827342052657173362492472666631120594218414085755;

/// Natural logarithm of π: ln(π) ≈ 1.144729885849400.
///
/// Used by the reflection formula on the log scale.
pub(crate) const LN_PI: f64 = 1.1447298858494002;

/// Euler–Mascheroni constant γ ≈ 0.5772156649015329.
///
/// Leading constant of the exponential integral series `E₁(x) = -γ - ln x - Σ ...`.
pub(crate) const EULER_GAMMA: f64 = 0.57721566490153286060651209008240243104215933593992;

/// Largest argument for which Γ(x) is finite in double precision.
///
/// Above this the Lanczos power term overflows and Γ saturates to `+∞`.
pub(crate) const GAMMA_MAX_ARG: f64 = 171.624376956302725;

// ******** Incomplete gamma ********************************************/

/// 2⁵², the renormalisation threshold for the continued fraction convergents.
///
/// Numerator and denominator grow geometrically; once either exceeds this they
/// are both rescaled by [`BIG_INV`], which leaves their ratio untouched.
pub(crate) const BIG: f64 = 4503599627370496.0;

/// 2⁻⁵², the reciprocal of [`BIG`].
pub(crate) const BIG_INV: f64 = 2.22044604925031308085e-16;

/// -ln(f64::MAX) ≈ -709.78, below which `exp` leaves the normal range.
///
/// A log prefix below this cannot contribute to either tail, so the regularised
/// gamma saturates to exactly 0 or 1 without entering any loop.
pub(crate) const LOG_MIN: f64 = -709.78271289338399;

/// Break-point of the `log1pmx` power series.
///
/// For `|u|` below this the series `-u²/2 + u³/3 - ...` is summed directly; above it
/// `ln(1+u) - u` no longer cancels and is evaluated in closed form.
pub(crate) const LOG1PMX_SERIES_MAX: f64 = 0.25;

/// Coefficients `d[k][n]` of Temme's uniform asymptotic expansion.
///
/// Row `k` is the Taylor series in `η` of the `k`th correction term, so that
/// `S(a, η) = Σ_k a^-k Σ_n d[k][n] η^n`.
pub(crate) const TEMME_D: [[f64; TEMME_TERMS]; TEMME_ORDERS] = [
    [
        -0.3333333333333333, 0.08333333333333333, -0.014814814814814815,
        0.0011574074074074073, 0.0003527336860670194, -0.0001787551440329218,
        3.919263178522438e-05, -2.185448510679992e-06, -1.85406221071516e-06,
        8.296711340953087e-07, -1.7665952736826078e-07, 6.707853543401498e-09,
        1.0261809784240309e-08, -4.382036018453353e-09, 9.14769958223679e-10,
        -2.5514193994946248e-11, -5.830772132550426e-11, 2.4361948020667415e-11,
        -5.0276692801141755e-12, 1.1004392031956135e-13, 3.371763262400985e-13,
        -1.392388722418162e-13, 2.8534893807047445e-14, -5.139111834242572e-16,
        -1.9752288294349442e-15,
    ],
    [
        -0.001851851851851852, -0.003472222222222222, 0.0026455026455026454,
        -0.0009902263374485596, 0.00020576131687242798, -4.018775720164609e-07,
        -1.8098550334489977e-05, 7.64916091608111e-06, -1.6120900894563446e-06,
        4.647127802807434e-09, 1.378633446915721e-07, -5.752545603517705e-08,
        1.1951628599778148e-08, -1.7543241719747647e-11, -1.0091543710600413e-09,
        4.162792991842583e-10, -8.56390702649298e-11, 6.067215101604758e-14,
        7.1624989648114856e-12, -2.933186643771437e-12, 5.996696365683689e-13,
        -2.1671786527323313e-16, -4.978339972369262e-14, 2.0291628823713425e-14,
        -4.13125571381061e-15,
    ],
    [
        0.004133597883597883, -0.0026813271604938273, 0.0007716049382716049,
        2.0093878600823047e-06, -0.0001073665322636516, 5.2923448829120125e-05,
        -1.2760635188618728e-05, 3.423578734096138e-08, 1.3721957309062934e-06,
        -6.298992138380055e-07, 1.4280614206064242e-07, -2.0477098421990866e-10,
        -1.409252991086752e-08, 6.228974084922022e-09, -1.3670488396617114e-09,
        9.428356159014678e-13, 1.2872252400089318e-10, -5.5645956134363323e-11,
        1.197593554636698e-11, -4.1689782251838634e-15, -1.0940640427884595e-12,
        4.662239946390136e-13, -9.905105763906907e-14, 1.8931876768373515e-17,
        8.859221872591127e-15,
    ],
    [
        0.0006494341563786008, 0.00022947209362139917, -0.0004691894943952557,
        0.00026772063206283885, -7.561801671883977e-05, -2.396505113867297e-07,
        1.1082654115347302e-05, -5.6749528269915965e-06, 1.4230900732435883e-06,
        -2.7861080291528143e-11, -1.6958404091930278e-07, 8.099464905388083e-08,
        -1.9111168485973655e-08, 2.3928620439808118e-12, 2.0620131815488797e-09,
        -9.460496661855133e-10, 2.1541049775774907e-10, -1.388823336813903e-14,
        -2.1894761681963938e-11, 9.790998951171684e-12, -2.178219188018096e-12,
        6.208819573407901e-17, 2.126978363279737e-13, -9.344688791517433e-14,
        2.045367122678285e-14,
    ],
    [
        -0.0008618882909167117, 0.0007840392217200666, -0.0002990724803031902,
        -1.4638452578843418e-06, 6.641498215465122e-05, -3.968365047179435e-05,
        1.1375726970678419e-05, 2.507497226237533e-10, -1.6954149536558305e-06,
        8.907507532205309e-07, -2.292934834000805e-07, 2.956794137544049e-11,
        2.8865829742708783e-08, -1.4189739437803219e-08, 3.4463580499464896e-09,
        -2.3024517174528067e-13, -3.9409233028046403e-10, 1.86023389685045e-10,
        -4.356323005056618e-11, 1.278600101629623e-15, 4.67927502665792e-12,
        -2.149246470613483e-12, 4.908815614809652e-13, -6.33859148489156e-18,
        -5.045332069080094e-14,
    ],
    [
        -0.00033679855336635813, -6.972813758365857e-05, 0.0002772753244959392,
        -0.00019932570516188847, 6.797780477937208e-05, 1.419062920643967e-07,
        -1.3594048189768693e-05, 8.018470256334202e-06, -2.291481176508095e-06,
        -3.252473551298454e-10, 3.4652846491085265e-07, -1.8447187191171344e-07,
        4.8240967037894184e-08, -1.7989466721743514e-14, -6.306194500013523e-09,
        3.162417628774568e-09, -7.840924253697429e-10, 5.192679165254041e-15,
        9.358944242306784e-11, -4.513426216163278e-11, 1.0799129993116828e-11,
        -3.661886712685252e-17, -1.210902069055155e-12, 5.680743584990564e-13,
        -1.3249659916340829e-13,
    ],
    [
        0.0005313079364639922, -0.0005921664373536939, 0.0002708782096718045,
        7.902353232660328e-07, -8.153969367561969e-05, 5.61168275310625e-05,
        -1.8329116582843375e-05, -3.0796134506033047e-09, 3.465155368803609e-06,
        -2.0291327396058603e-06, 5.788792863149004e-07, 2.338630673826657e-13,
        -8.828600746330484e-08, 4.7435958880408125e-08, -1.2545415020710383e-08,
        8.649648858010293e-14, 1.6846058979264062e-09, -8.575492823577594e-10,
        2.1598224929232125e-10, -7.613230520476153e-16, -2.6639822008536144e-11,
        1.3065700536611057e-11, -3.1799163902367977e-12, 4.710976121367431e-18,
        3.6902800842763465e-13,
    ],
    [
        0.00034436760689237765, 5.171790908260592e-05, -0.00033493161081142234,
        0.0002812695154763237, -0.00010976582244684731, -1.2741009095484485e-07,
        2.7744451511563645e-05, -1.8263488805711332e-05, 5.7876949497350525e-06,
        4.93875893393627e-10, -1.0595367014026043e-06, 6.166714376110408e-07,
        -1.7562973359060463e-07, -1.297447328701544e-12, 2.695423606288966e-08,
        -1.4578352908731272e-08, 3.887645959386175e-09, -3.881002251019412e-17,
        -5.327994173877286e-10, 2.7437977643314844e-10, -6.995796092070568e-11,
        2.589986387486848e-17, 8.856689099669639e-12, -4.403168815871311e-12,
        1.0865561947091654e-12,
    ],
];

// ******** Inverse normal seed (Acklam) ********************************/

/// Acklam's inverse normal CDF approximation coefficients (numerator polynomial).
///
/// Rational approximation to Φ⁻¹(p) across the central region
/// 0.02425 < p < 0.97575. Only feeds the Wilson–Hilferty seed of the inverse
/// regularised gamma, so its ~1e-9 accuracy is more than sufficient.
pub(crate) const A: [f64; 6] = [
    -3.969683028665376e+01,
    2.209460984245205e+02,
    -2.759285104469687e+02,
    1.383577518672690e+02,
    -3.066479806614716e+01,
    2.506628277459239e+00,
];

/// Acklam's inverse normal CDF approximation coefficients (denominator polynomial).
pub(crate) const B: [f64; 5] = [
    -5.447609879822406e+01,
    1.615858368580409e+02,
    -1.556989798598866e+02,
    6.680131188771972e+01,
    -1.328068155288572e+01,
];

/// Acklam's inverse normal CDF tail coefficients (numerator polynomial).
///
/// Evaluated in `t = sqrt(-2 ln p)` for the outer tails p < 0.02425.
pub(crate) const C: [f64; 6] = [
    -7.784894002430293e-03,
    -3.223964580411365e-01,
    -2.400758277161838e+00,
    -2.549732539343734e+00,
    4.374664141464968e+00,
    2.938163982698783e+00,
];

/// Acklam's inverse normal CDF tail coefficients (denominator polynomial).
pub(crate) const D: [f64; 4] = [
    7.784695709041462e-03,
    3.224671290700398e-01,
    2.445134137142996e+00,
    3.754408661907416e+00,
];

/// Break-point between Acklam's central and tail approximations (≈ -2σ).
pub(crate) const P_LOW: f64 = 0.02425;

// ******** Factorials **************************************************/

/// Exact factorial lookup table for n! computation.
///
/// Returns n! for n ∈ [0, 170] from a pre-computed double-precision table and
/// `+∞` beyond, where n! is no longer representable.
#[inline(always)]
pub(crate) fn factorial_lookup(n: u64) -> f64 {
    // Precomputed factorials for n=0..=170
    // Sourced via python's math lib float(math.factorial(n))
    const FACTORIALS: [f64; 171] = [
        1.0,
        1.0,
        2.0,
        6.0,
        24.0,
        120.0,
        720.0,
        5040.0,
        40320.0,
        362880.0,
        3628800.0,
        39916800.0,
        479001600.0,
        6227020800.0,
        87178291200.0,
        1307674368000.0,
        20922789888000.0,
        355687428096000.0,
        6402373705728000.0,
        1.21645100408832e+17,
        2.43290200817664e+18,
        5.109094217170944e+19,
        1.1240007277776077e+21,
        2.585201673888498e+22,
        6.204484017332394e+23,
        1.5511210043330986e+25,
        4.0329146112660565e+26,
        1.0888869450418352e+28,
        3.0488834461171387e+29,
        8.841761993739702e+30,
        2.6525285981219107e+32,
        8.222838654177922e+33,
        2.631308369336935e+35,
        8.683317618811886e+36,
        2.9523279903960416e+38,
        1.0333147966386145e+40,
        3.7199332678990125e+41,
        1.3763753091226346e+43,
        5.230226174666011e+44,
        2.0397882081197444e+46,
        8.159152832478977e+47,
        3.345252661316381e+49,
        1.40500611775288e+51,
        6.041526306337383e+52,
        2.658271574788449e+54,
        1.1962222086548019e+56,
        5.502622159812089e+57,
        2.5862324151116818e+59,
        1.2413915592536073e+61,
        6.082818640342675e+62,
        3.0414093201713376e+64,
        1.5511187532873822e+66,
        8.065817517094388e+67,
        4.2748832840600255e+69,
        2.308436973392414e+71,
        1.2696403353658276e+73,
        7.109985878048635e+74,
        4.0526919504877214e+76,
        2.3505613312828785e+78,
        1.3868311854568984e+80,
        8.32098711274139e+81,
        5.075802138772248e+83,
        3.146997326038794e+85,
        1.98260831540444e+87,
        1.2688693218588417e+89,
        8.247650592082472e+90,
        5.443449390774431e+92,
        3.647111091818868e+94,
        2.4800355424368305e+96,
        1.711224524281413e+98,
        1.1978571669969892e+100,
        8.504785885678623e+101,
        6.1234458376886085e+103,
        4.4701154615126844e+105,
        3.307885441519386e+107,
        2.48091408113954e+109,
        1.8854947016660504e+111,
        1.4518309202828587e+113,
        1.1324281178206297e+115,
        8.946182130782976e+116,
        7.156945704626381e+118,
        5.797126020747368e+120,
        4.753643337012842e+122,
        3.945523969720659e+124,
        3.314240134565353e+126,
        2.81710411438055e+128,
        2.4227095383672734e+130,
        2.107757298379528e+132,
        1.8548264225739844e+134,
        1.650795516090846e+136,
        1.4857159644817615e+138,
        1.352001527678403e+140,
        1.2438414054641308e+142,
        1.1567725070816416e+144,
        1.087366156656743e+146,
        1.032997848823906e+148,
        9.916779348709496e+149,
        9.619275968248212e+151,
        9.426890448883248e+153,
        9.332621544394415e+155,
        9.332621544394415e+157,
        9.42594775983836e+159,
        9.614466715035127e+161,
        9.90290071648618e+163,
        1.0299016745145628e+166,
        1.081396758240291e+168,
        1.1462805637347084e+170,
        1.226520203196138e+172,
        1.324641819451829e+174,
        1.4438595832024937e+176,
        1.588245541522743e+178,
        1.7629525510902446e+180,
        1.974506857221074e+182,
        2.2311927486598138e+184,
        2.5435597334721877e+186,
        2.925093693493016e+188,
        3.393108684451898e+190,
        3.969937160808721e+192,
        4.684525849754291e+194,
        5.574585761207606e+196,
        6.689502913449127e+198,
        8.094298525273444e+200,
        9.875044200833601e+202,
        1.214630436702533e+205,
        1.506141741511141e+207,
        1.882677176888926e+209,
        2.372173242880047e+211,
        3.0126600184576594e+213,
        3.856204823625804e+215,
        4.974504222477287e+217,
        6.466855489220474e+219,
        8.47158069087882e+221,
        1.1182486511960043e+224,
        1.4872707060906857e+226,
        1.9929427461615188e+228,
        2.6904727073180504e+230,
        3.659042881952549e+232,
        5.012888748274992e+234,
        6.917786472619489e+236,
        9.615723196941089e+238,
        1.3462012475717526e+241,
        1.898143759076171e+243,
        2.695364137888163e+245,
        3.854370717180073e+247,
        5.5502938327393044e+249,
        8.047926057471992e+251,
        1.1749972043909107e+254,
        1.727245890454639e+256,
        2.5563239178728654e+258,
        3.80892263763057e+260,
        5.713383956445855e+262,
        8.62720977423324e+264,
        1.3113358856834524e+267,
        2.0063439050956823e+269,
        3.0897696138473508e+271,
        4.789142901463394e+273,
        7.471062926282894e+275,
        1.1729568794264145e+278,
        1.853271869493735e+280,
        2.9467022724950384e+282,
        4.7147236359920616e+284,
        7.590705053947219e+286,
        1.2296942187394494e+289,
        2.0044015765453026e+291,
        3.287218585534296e+293,
        5.423910666131589e+295,
        9.003691705778438e+297,
        1.503616514864999e+300,
        2.5260757449731984e+302,
        4.269068009004705e+304,
        7.257415615307999e+306,
    ];
    if n > 170 {
        f64::INFINITY
    } else {
        FACTORIALS[n as usize]
    }
}
