//! The decimal expansion of pi backing every ordering decision.
//!
//! Comparisons between symbolic numbers substitute longer and longer
//! prefixes of this table until the error intervals separate. The table is
//! the only numeric knowledge of pi in the crate; everywhere else pi stays a
//! formal variable.

use num::bigint::BigInt;
use num::{One, Signed, Zero};

/// The first 10,000 digits of pi, leading 3 included, no decimal point.
const DIGITS: &str = "314159265358979323846264338327950288419716939937510582097494459230781640628620\
     899862803482534211706798214808651328230664709384460955058223172535940812848111\
     745028410270193852110555964462294895493038196442881097566593344612847564823378\
     678316527120190914564856692346034861045432664821339360726024914127372458700660\
     631558817488152092096282925409171536436789259036001133053054882046652138414695\
     194151160943305727036575959195309218611738193261179310511854807446237996274956\
     735188575272489122793818301194912983367336244065664308602139494639522473719070\
     217986094370277053921717629317675238467481846766940513200056812714526356082778\
     577134275778960917363717872146844090122495343014654958537105079227968925892354\
     201995611212902196086403441815981362977477130996051870721134999999837297804995\
     105973173281609631859502445945534690830264252230825334468503526193118817101000\
     313783875288658753320838142061717766914730359825349042875546873115956286388235\
     378759375195778185778053217122680661300192787661119590921642019893809525720106\
     548586327886593615338182796823030195203530185296899577362259941389124972177528\
     347913151557485724245415069595082953311686172785588907509838175463746493931925\
     506040092770167113900984882401285836160356370766010471018194295559619894676783\
     744944825537977472684710404753464620804668425906949129331367702898915210475216\
     205696602405803815019351125338243003558764024749647326391419927260426992279678\
     235478163600934172164121992458631503028618297455570674983850549458858692699569\
     092721079750930295532116534498720275596023648066549911988183479775356636980742\
     654252786255181841757467289097777279380008164706001614524919217321721477235014\
     144197356854816136115735255213347574184946843852332390739414333454776241686251\
     898356948556209921922218427255025425688767179049460165346680498862723279178608\
     578438382796797668145410095388378636095068006422512520511739298489608412848862\
     694560424196528502221066118630674427862203919494504712371378696095636437191728\
     746776465757396241389086583264599581339047802759009946576407895126946839835259\
     570982582262052248940772671947826848260147699090264013639443745530506820349625\
     245174939965143142980919065925093722169646151570985838741059788595977297549893\
     016175392846813826868386894277415599185592524595395943104997252468084598727364\
     469584865383673622262609912460805124388439045124413654976278079771569143599770\
     012961608944169486855584840635342207222582848864815845602850601684273945226746\
     767889525213852254995466672782398645659611635488623057745649803559363456817432\
     411251507606947945109659609402522887971089314566913686722874894056010150330861\
     792868092087476091782493858900971490967598526136554978189312978482168299894872\
     265880485756401427047755513237964145152374623436454285844479526586782105114135\
     473573952311342716610213596953623144295248493718711014576540359027993440374200\
     731057853906219838744780847848968332144571386875194350643021845319104848100537\
     061468067491927819119793995206141966342875444064374512371819217999839101591956\
     181467514269123974894090718649423196156794520809514655022523160388193014209376\
     213785595663893778708303906979207734672218256259966150142150306803844773454920\
     260541466592520149744285073251866600213243408819071048633173464965145390579626\
     856100550810665879699816357473638405257145910289706414011097120628043903975951\
     567715770042033786993600723055876317635942187312514712053292819182618612586732\
     157919841484882916447060957527069572209175671167229109816909152801735067127485\
     832228718352093539657251210835791513698820914442100675103346711031412671113699\
     086585163983150197016515116851714376576183515565088490998985998238734552833163\
     550764791853589322618548963213293308985706420467525907091548141654985946163718\
     027098199430992448895757128289059232332609729971208443357326548938239119325974\
     636673058360414281388303203824903758985243744170291327656180937734440307074692\
     112019130203303801976211011004492932151608424448596376698389522868478312355265\
     821314495768572624334418930396864262434107732269780280731891544110104468232527\
     162010526522721116603966655730925471105578537634668206531098965269186205647693\
     125705863566201855810072936065987648611791045334885034611365768675324944166803\
     962657978771855608455296541266540853061434443185867697514566140680070023787765\
     913440171274947042056223053899456131407112700040785473326993908145466464588079\
     727082668306343285878569830523580893306575740679545716377525420211495576158140\
     025012622859413021647155097925923099079654737612551765675135751782966645477917\
     450112996148903046399471329621073404375189573596145890193897131117904297828564\
     750320319869151402870808599048010941214722131794764777262241425485454033215718\
     530614228813758504306332175182979866223717215916077166925474873898665494945011\
     465406284336639379003976926567214638530673609657120918076383271664162748888007\
     869256029022847210403172118608204190004229661711963779213375751149595015660496\
     318629472654736425230817703675159067350235072835405670403867435136222247715891\
     504953098444893330963408780769325993978054193414473774418426312986080998886874\
     132604721569516239658645730216315981931951673538129741677294786724229246543668\
     009806769282382806899640048243540370141631496589794092432378969070697794223625\
     082216889573837986230015937764716512289357860158816175578297352334460428151262\
     720373431465319777741603199066554187639792933441952154134189948544473456738316\
     249934191318148092777710386387734317720754565453220777092120190516609628049092\
     636019759882816133231666365286193266863360627356763035447762803504507772355471\
     058595487027908143562401451718062464362679456127531813407833033625423278394497\
     538243720583531147711992606381334677687969597030983391307710987040859133746414\
     428227726346594704745878477872019277152807317679077071572134447306057007334924\
     369311383504931631284042512192565179806941135280131470130478164378851852909285\
     452011658393419656213491434159562586586557055269049652098580338507224264829397\
     285847831630577775606888764462482468579260395352773480304802900587607582510474\
     709164396136267604492562742042083208566119062545433721315359584506877246029016\
     187667952406163425225771954291629919306455377991403734043287526288896399587947\
     572917464263574552540790914513571113694109119393251910760208252026187985318877\
     058429725916778131496990090192116971737278476847268608490033770242429165130050\
     051683233643503895170298939223345172201381280696501178440874519601212285993716\
     231301711444846409038906449544400619869075485160263275052983491874078668088183\
     385102283345085048608250393021332197155184306354550076682829493041377655279397\
     517546139539846833936383047461199665385815384205685338621867252334028308711232\
     827892125077126294632295639898989358211674562701021835646220134967151881909730\
     381198004973407239610368540664319395097901906996395524530054505806855019567302\
     292191393391856803449039820595510022635353619204199474553859381023439554495977\
     837790237421617271117236434354394782218185286240851400666044332588856986705431\
     547069657474585503323233421073015459405165537906866273337995851156257843229882\
     737231989875714159578111963583300594087306812160287649628674460477464915995054\
     973742562690104903778198683593814657412680492564879855614537234786733039046883\
     834363465537949864192705638729317487233208376011230299113679386270894387993620\
     162951541337142489283072201269014754668476535761647737946752004907571555278196\
     536213239264061601363581559074220202031872776052772190055614842555187925303435\
     139844253223415762336106425063904975008656271095359194658975141310348227693062\
     474353632569160781547818115284366795706110861533150445212747392454494542368288\
     606134084148637767009612071512491404302725386076482363414334623518975766452164\
     137679690314950191085759844239198629164219399490723623464684411739403265918404\
     437805133389452574239950829659122850855582157250310712570126683024029295252201\
     187267675622041542051618416348475651699981161410100299607838690929160302884002\
     691041407928862150784245167090870006992821206604183718065355672525325675328612\
     910424877618258297651579598470356222629348600341587229805349896502262917487882\
     027342092222453398562647669149055628425039127577102840279980663658254889264880\
     254566101729670266407655904290994568150652653053718294127033693137851786090407\
     086671149655834343476933857817113864558736781230145876871266034891390956200993\
     936103102916161528813843790990423174733639480457593149314052976347574811935670\
     911013775172100803155902485309066920376719220332290943346768514221447737939375\
     170344366199104033751117354719185504644902636551281622882446257591633303910722\
     538374218214088350865739177150968288747826569959957449066175834413752239709683\
     408005355984917541738188399944697486762655165827658483588453142775687900290951\
     702835297163445621296404352311760066510124120065975585127617858382920419748442\
     360800719304576189323492292796501987518721272675079812554709589045563579212210\
     333466974992356302549478024901141952123828153091140790738602515227429958180724\
     716259166854513331239480494707911915326734302824418604142636395480004480026704\
     962482017928964766975831832713142517029692348896276684403232609275249603579964\
     692565049368183609003238092934595889706953653494060340216654437558900456328822\
     505452556405644824651518754711962184439658253375438856909411303150952617937800\
     297412076651479394259029896959469955657612186561967337862362561252163208628692\
     221032748892186543648022967807057656151446320469279068212073883778142335628236\
     089632080682224680122482611771858963814091839036736722208883215137556003727983\
     940041529700287830766709444745601345564172543709069793961225714298946715435784\
     687886144458123145935719849225284716050492212424701412147805734551050080190869\
     960330276347870810817545011930714122339086639383395294257869050764310063835198\
     343893415961318543475464955697810382930971646514384070070736041123735998434522\
     516105070270562352660127648483084076118301305279320542746286540360367453286510\
     570658748822569815793678976697422057505968344086973502014102067235850200724522\
     563265134105592401902742162484391403599895353945909440704691209140938700126456\
     001623742880210927645793106579229552498872758461012648369998922569596881592056\
     0010165525637567";

/// The longest usable significant-figure count.
pub fn max_significant_figures() -> usize {
    DIGITS.len()
}

/// The first `sf` digits of pi as an integer, i.e. the floor of
/// `pi * 10^(sf - 1)`.
fn prefix(sf: usize) -> BigInt {
    debug_assert!(sf >= 1 && sf <= DIGITS.len());
    match BigInt::parse_bytes(DIGITS[..sf].as_bytes(), 10) {
        Some(p) => p,
        None => unreachable!(),
    }
}

fn pow10(exp: usize) -> BigInt {
    num::pow(BigInt::from(10), exp)
}

/// Evaluates `poly` at pi, scaled to an integer: the result approximates
/// `poly(pi) * 10^(d * (sf - 1))` where `d` is the degree of `poly`.
pub fn evaluate(poly: &[BigInt], sf: usize) -> BigInt {
    let d = poly.len().saturating_sub(1);
    let p = prefix(sf);
    let mut total = BigInt::zero();
    for (i, c) in poly.iter().enumerate() {
        total += c * num::pow(p.clone(), i) * pow10((d - i) * (sf - 1));
    }
    total
}

/// Like [`evaluate`], but returns an inclusive interval that is guaranteed
/// to contain the exact scaled value of `poly` at pi.
///
/// `pi * 10^(sf - 1)` lies in `[prefix, prefix + 1)`, so each non-constant
/// term is bounded by evaluating its power at both ends of that interval.
pub fn evaluate_with_margin(poly: &[BigInt], sf: usize) -> (BigInt, BigInt) {
    let d = poly.len().saturating_sub(1);
    let p = prefix(sf);
    let p1 = &p + BigInt::one();
    let mut low = BigInt::zero();
    let mut high = BigInt::zero();
    for (i, c) in poly.iter().enumerate() {
        if c.is_zero() {
            continue;
        }
        let scale = pow10((d - i) * (sf - 1));
        let near = c * num::pow(p.clone(), i) * &scale;
        let far = c * num::pow(p1.clone(), i) * &scale;
        if c.is_negative() {
            low += far;
            high += near;
        } else {
            low += near;
            high += far;
        }
    }
    (low, high)
}
