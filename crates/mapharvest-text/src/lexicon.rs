//! Keyword lexicon for restaurant reviews in Indonesian and casual English
//! Keywords are matched as lowercase substrings of the review text.

pub const FOOD_QUALITY_POSITIVE: &[&str] = &[
    "enak", "lezat", "mantap", "nikmat", "segar", "gurih", "empuk", "kres", "juicy", "renyah",
    "crispy", "sedap", "kompleks", "kaya rasa", "recommended", "rekomen", "wajib coba", "favorit",
    "juara", "top", "mantul", "enak banget", "nagih", "bikin ketagihan", "super lezat",
    "mantep pol", "endol", "enak gila", "gokil rasanya", "gaada lawan", "bikin ngiler",
    "parah enaknya", "maknyus", "nendang", "istimewa", "perfect", "amazing", "super enak",
    "ok banget", "mantap jiwa", "terbaik", "juara banget", "gila sih ini", "taste-nya dapet",
    "rasa berasa", "auto repeat order", "rasa mewah", "ga bohong enak", "worth to try",
    "selalu enak", "ga pernah gagal", "wah parah", "gila enaknya", "tastynya nempel",
    "meledak di mulut", "full flavor", "rasa kaya", "khas banget", "autobeli lagi",
    "ga kalah sama resto", "recommended banget", "bumbu nendang", "enak parah", "makin enak",
    "rasanya pas", "ga kemanisan", "balance banget", "creamy", "lembut", "juicy banget",
    "super crunchy", "crispy abis", "taste solid", "ngangenin", "perfect balance", "rasa otentik",
    "fresh banget", "auto lapar", "aromanya menggoda", "ga nyesel beli", "worth it banget",
    "bikin bahagia", "masih keinget rasanya", "best in town", "kualitas rasa top", "chef’s kiss",
    "maknyuss", "legit", "authentic", "berasa effort-nya", "rasa nempel di lidah",
    "autopesan lagi", "full bumbu", "taste mantap", "flavor bomb", "ga bisa berhenti makan",
    "rasa khas banget", "premium taste", "rasa rich", "wangi menggoda", "juara rasa", "rasa kuat",
];

pub const FOOD_QUALITY_NEGATIVE: &[&str] = &[
    "hambar", "tawar", "tidak enak", "ga enak", "kurang enak", "lembek", "alot", "keras", "basi",
    "amis", "anyir", "pahit", "kurang cocok", "biasa aja", "mengecewakan", "aneh rasanya",
    "ga jelas", "ga sesuai ekspektasi", "ga worth it", "rasanya aneh", "ga fresh", "kayak basi",
    "ga matang", "mentah", "kegosongan", "keasinan", "kematangan", "terlalu manis",
    "ga nyatu rasanya", "aneh banget", "ga berasa", "plain", "kurang gurih", "porsinya aneh",
    "rasanya hilang", "nggak banget", "bumbunya ga nyatu", "rasa gagal", "ga sesuai harga",
    "ga nikmat", "asin banget", "manis banget", "ga niat masak", "rasa ancur", "tekstur aneh",
    "ga karuan", "menjijikkan", "bau amis", "bau tengik", "bau basi", "rasa aneh banget",
    "ga bisa dimakan", "mual", "bikin eneg", "ga fresh sama sekali", "ga layak makan",
    "ga rekomen", "mengecewakan banget", "gagal total", "aneh di lidah", "teksturnya salah",
    "keras banget", "nggak renyah", "ga garing", "kaya plastik", "rasa buatan", "kayak instan",
    "kurang seasoning", "ga berbumbu", "bumbunya hambar", "aneh banget rasanya", "ga enak parah",
    "bikin kecewa", "ga bakal beli lagi", "bad taste", "tidak sesuai harapan", "kecewa berat",
    "overcooked", "undercooked", "ga seimbang", "bumbunya berlebihan", "ga nyatu", "ga banget sih",
    "ga masuk lidah", "rasa kacau", "flop", "zonk", "menyesal beli", "taste-nya off", "aneh parah",
    "ga layak jual", "bau aneh", "rasa busuk", "pahit banget", "bau tengik banget", "rasa basi",
    "ga nyatu banget", "ga sesuai review", "bumbunya aneh",
];

pub const PRICE_POSITIVE: &[&str] = &[
    "murah", "terjangkau", "worth it", "sesuai", "pas", "oke", "affordable", "masuk kantong",
    "ga mahal", "tidak mahal", "harga bersahabat", "hemat", "ramah kantong", "harga oke",
    "murah banget", "super worth", "murah meriah", "harga cucok", "value for money", "ekonomis",
    "harga aman", "ga bikin kantong jebol", "ga overprice", "harga masuk akal", "reasonable",
    "sepadan", "harga pantas", "good deal", "diskonnya lumayan", "murah tapi enak",
    "terjangkau banget", "budget friendly", "harga bersahabat banget", "murah pol",
    "murah tapi mantap", "best deal", "nggak rugi", "bener-bener worth", "murah tapi puas",
    "mantap harganya", "harga kompetitif", "harga bagus", "deal banget", "ga nyesel beli",
    "hemat banget", "murah tapi kualitas top", "super value", "harga pas banget",
    "ngirit tapi nikmat", "murah tapi mewah", "value tinggi", "promo oke", "paket hemat",
    "harga terbaik", "budget aman", "harga damai", "murah tapi kece", "affordable banget",
    "hemat parah", "harga cakep", "murah tapi berkelas", "hemat dompet", "value maksimal",
    "murah tapi worth it", "harga mantap", "murah tapi berkualitas", "super affordable",
    "ga kemahalan", "murah meriah banget", "super hemat", "hemat cuy", "harga aman banget",
    "murah cuy", "harga low banget", "murah tapi bagus", "best price", "murah tapi ga murahan",
    "value-nya dapet", "harga masuk akal banget", "murah bener", "harga manusiawi",
    "murah tapi puas banget", "murah tapi ga abal-abal", "harga normal", "harga jujur",
    "harga wajar", "harga sesuai", "murah tapi solid", "murah tapi nikmat",
    "murah tapi worth every bite", "ngirit tapi puas", "harga masuk di dompet", "murah parah",
];

pub const PRICE_NEGATIVE: &[&str] = &[
    "mahal", "kemahalan", "overprice", "tidak sesuai", "ga sesuai", "terlalu mahal", "ga worth",
    "tidak worth", "harga ga masuk akal", "harga tinggi", "nggak sepadan", "ga sesuai kualitas",
    "mahal banget", "nggak worth it", "overpriced", "ga sebanding", "kemahalan parah",
    "nggak pantas", "harga ga logis", "ga sesuai isi", "bikin nyesek", "mahal tapi biasa aja",
    "nggak sebanding sama rasa", "mahal tapi zonk", "harga nyiksa", "harga bikin mikir",
    "harga sadis", "mahalnya ga wajar", "ga sesuai ekspektasi", "harga gila", "harga aneh",
    "harga ngaco", "mahal banget sih", "bikin nyesel", "mahal tapi ga sebanding", "harga ga worth",
    "nggak layak", "mahal tapi ga enak", "harga kelewatan", "harga parah", "nggak affordable",
    "nggak ramah kantong", "bikin boncos", "harga ga manusiawi", "harga nggak cocok",
    "nggak sesuai value", "over banget", "nggak worth sama sekali", "kemahalan sih",
    "ga sesuai rasa", "harga menipu", "ga pantes segitu", "mahal tapi gagal", "harga ngibul",
    "ga sepadan banget", "ga make sense", "bikin kantong jebol", "mahal tapi hambar",
    "ga layak harganya", "ga sebanding sama harga", "harga ajaib", "harga ga fair",
    "ga cocok kantong", "harga absurd", "ga sesuai dompet", "harga ancur", "ga masuk akal banget",
    "harga rusak", "harga bikin males", "nggak worth banget", "kemahalan gila", "bikin rugi",
    "ga sesuai harapan", "mahal padahal biasa aja", "nggak balance", "harga bohong",
    "harga tipu-tipu", "kemahalan banget", "mahal banget parah", "harga sadis banget",
    "harga zonk", "harga menyesakkan",
];

pub const SERVICE_POSITIVE: &[&str] = &[
    "ramah", "baik", "cepat", "responsif", "sopan", "membantu", "pelayanan baik", "friendly",
    "helpful", "sigap", "tanggap", "fast response", "cekatan", "niat", "welcome", "ramah banget",
    "super ramah", "gercep", "nggak nyuekin", "pelayan sopan", "humble", "respons cepat",
    "niat banget", "mau bantu", "nggak jutek", "sopan banget", "ramah parah", "pelayanan mantap",
    "respons oke", "melayani dengan baik", "cepat tanggap", "service oke", "service cepat",
    "customer service mantap", "super helpful", "senyum terus", "positive attitude",
    "welcome banget", "ramah maksimal", "pelayanannya keren", "cepet banget", "fast banget",
    "ramah abis", "good attitude", "super niat", "melayani dengan hati", "service bintang lima",
    "ramah all out", "niat banget pelayanannya", "bikin nyaman", "super fast", "friendly banget",
    "nggak ribet", "proaktif", "pelayanannya top", "santun", "super baik", "pelayanannya bagus",
    "ga nunggu lama", "tanggap banget", "ramah gila", "enak komunikasinya", "sigap abis",
    "pelayanan niat", "ramah total", "ga jutek sama sekali", "super cepat", "melayani maksimal",
    "helpful banget", "pelayanannya sopan banget", "santai tapi niat", "nggak galak",
    "sabar banget", "super sabar", "pelayanan tulus", "bener-bener melayani", "care banget",
    "servicenya the best", "bikin puas", "ramah 10/10", "ramah all staff",
    "ramah banget pelayannya", "nggak nyolot",
];

pub const SERVICE_NEGATIVE: &[&str] = &[
    "lambat", "lama", "ketus", "jutek", "tidak ramah", "ga ramah", "pelayanan buruk",
    "pelayanan kurang", "kurang sopan", "slow", "nyebelin", "galak", "nyolot", "jutek banget",
    "lama banget", "slow respon", "nggak tanggap", "ga sigap", "pelayanan nyebelin",
    "ga enak dilayanin", "ga niat", "pelayan jutek", "pelayan ga ramah", "nggak bantu",
    "service jelek", "ga profesional", "sombong", "pelayanan asal", "pelayanannya buruk",
    "ga care", "pelayan ngeselin", "nggak sopan banget", "pelayanannya parah", "nggak gercep",
    "respon lama", "pelayanan lama", "pelayanannya nyebelin", "ga fast response", "ga niat banget",
    "cuek", "dicuekin", "dibiarkan", "ga tanggap", "ga diperhatiin", "nggak diurus",
    "pelayan ngelawan", "kasar", "ketus banget", "pelayanan ga sopan", "pelayan songong",
    "ga ramah banget", "sok sibuk", "ga bantuin", "ga profesional banget",
    "pelayanannya nyebelin banget", "service parah", "slow banget", "ga sopan", "ga melayani",
    "pelayanannya ngaco", "nggak niat banget", "pelayan nyolot", "bikin males", "ga diladenin",
    "nggak responsif", "lama respon banget", "ga peka", "ga gesit", "ga ada inisiatif",
    "pelayan nyebelin banget", "pelayanannya jelek banget", "ga tanggung jawab", "service gagal",
    "pelayanannya zonk", "ga mau bantu", "malesin", "ga sopan banget", "pelayanan lambat banget",
    "bikin kesel", "nggak jelas", "bikin jengkel",
];

pub const AMBIANCE_POSITIVE: &[&str] = &[
    "nyaman", "bersih", "rapi", "cozy", "bagus", "luas", "sejuk", "ber-ac", "tenang", "asri",
    "aesthetic", "instagramable", "adem", "homey", "keren", "kekinian", "vibes-nya enak", "modern",
    "suasana santai", "bikin betah", "nyaman banget", "higienis", "rapih", "cakep tempatnya",
    "dekorasinya bagus", "suasana oke", "vibe positif", "tempat kece", "bersih banget", "wangi",
    "lighting bagus", "tempat luas", "view bagus", "suasana adem", "ga berisik", "suasana damai",
    "asik buat nongkrong", "cantik banget", "desainnya oke", "tempatnya nyaman", "vibe-nya dapet",
    "atmosfer enak", "bagus buat foto", "tempat estetik", "vibe calm", "nyaman parah",
    "rapi banget", "super cozy", "tempatnya bersih banget", "steril", "nggak pengap",
    "bikin rileks", "suasana homy", "nyaman buat kerja", "tempatnya santai", "ga bising",
    "asri banget", "interior keren", "desain interior bagus", "tempat kece banget", "vibe santai",
    "ga panas", "adem banget", "nyaman paripurna", "tempat hits", "lighting pas", "vibe chill",
    "suasananya calm", "bersih parah", "tempat modern", "santai banget", "sirkulasi udara bagus",
    "ruangan wangi", "tempat luas banget", "beneran cozy", "nyaman maksimal", "ruangannya adem",
    "tempat instagramable banget",
];

pub const AMBIANCE_NEGATIVE: &[&str] = &[
    "kotor", "sempit", "panas", "gerah", "berisik", "bising", "tidak nyaman", "ga nyaman", "kumuh",
    "pengap", "bau", "jorok", "sumpek", "berantakan", "bau asap", "bau rokok", "ga enak dilihat",
    "kacau", "gelap", "remang", "tempatnya jelek", "suasana ga enak", "ga cozy", "ga aesthetic",
    "bau amis", "bau got", "bau minyak", "tempat kecil", "rame banget", "bising parah", "ga betah",
    "bau banget", "jorok parah", "ga bersih", "lantai kotor", "meja kotor", "kursi kotor",
    "sampah dimana-mana", "ga tertata", "sirkulasi udara jelek", "tempat panas", "ac mati",
    "ga adem", "ga steril", "ga higienis", "bau apek", "ruangan sumpek", "pengap banget",
    "ruangannya gelap", "lampu redup", "vibe-nya aneh", "bau aneh", "bikin pusing", "bau parah",
    "bikin gerah", "ga tenang", "rame parah", "berisik banget", "ga bersih banget", "vibe aneh",
    "suasana buruk", "vibe jelek", "ga cakep", "ga cocok buat nongkrong", "ga menarik",
    "tempat ga layak", "jorok banget", "bikin ga betah", "ga nyaman banget", "sumpek banget",
    "bau nggak enak", "bau pesing", "ruangannya kotor", "tempatnya jelek banget", "ga terawat",
    "bikin ilfeel", "jorok total", "bau banget sih", "bau parah banget", "ga cozy sama sekali",
    "ga proper", "bau kenceng", "ruangannya panas",
];

pub const PORTION_POSITIVE: &[&str] = &[
    "banyak", "pas", "cukup", "mengenyangkan", "sepadan", "berlimpah", "porsinya oke", "ga pelit",
    "pas banget", "porsinya besar", "porsinya puas", "porsinya mantap", "porsinya banyak",
    "porsinya seimbang", "ngenyangin", "porsinya lumayan", "porsinya ga nanggung",
    "beneran kenyang", "value-nya dapet", "porsinya fair", "porsinya worth", "cukup banget",
    "ga kurang", "porsinya generous", "porsinya top", "porsinya ideal", "nggak dikit",
    "porsinya berasa", "porsinya mantul", "porsinya lega", "porsinya bikin kenyang",
    "porsinya ga pelit banget", "porsinya banyak banget", "porsinya ngagetin",
    "porsinya luar biasa", "porsinya bikin puas", "porsinya sesuai harga", "ga rugi beli",
    "porsinya gede", "porsinya mantap banget", "nggak nyesel porsi", "porsinya pas di perut",
    "porsinya ngenyangin banget",
];

pub const PORTION_NEGATIVE: &[&str] = &[
    "sedikit", "kecil", "kurang", "ga cukup", "pelit", "porsinya mini", "porsinya dikit",
    "ga sebanding", "porsinya nyesek", "porsinya kecewa", "porsinya nyeselin",
    "porsinya ga sesuai harga", "porsinya pelit banget", "ga sepadan", "porsinya ga layak",
    "ga ngenyangin", "porsinya nanggung", "porsinya parah", "porsinya ngaco",
    "porsinya kecil banget", "porsinya dikit banget", "porsinya nyesek banget", "porsinya aneh",
    "ga sesuai harapan", "ga layak", "porsinya bikin kecewa", "ga puas", "porsinya zonk",
    "ga sebanding harga", "porsinya ga worth", "porsinya ga nyatu", "ga kenyang",
    "bikin lapar lagi", "ga sesuai review", "porsinya ga wajar", "porsinya sadis", "ga masuk akal",
    "porsinya ngenes", "porsinya tipis", "porsinya terlalu kecil", "ga puas banget",
    "porsinya nyedih", "bikin kecewa parah", "porsinya parah banget", "ga layak segitu",
    "porsinya cimit", "ga sesuai ekspektasi",
];
