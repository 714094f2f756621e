//! Word list used to build temporary account logins and passwords

/// 256 short, unambiguous English words.
pub const WORDS: [&str; 256] = [
    "able", "acid", "aged", "also", "area", "army", "away", "baby", "back", "ball", "band",
    "bank", "base", "bath", "bear", "beat", "been", "bell", "best", "bird", "blow", "blue",
    "boat", "body", "bone", "book", "born", "both", "bowl", "bulk", "burn", "bush", "busy",
    "cake", "call", "calm", "came", "camp", "card", "care", "cart", "case", "cash", "cast",
    "cell", "chat", "chip", "city", "clay", "club", "coal", "coat", "code", "cold", "come",
    "cook", "cool", "cope", "copy", "core", "corn", "cost", "crew", "crop", "dark", "data",
    "date", "dawn", "deal", "dear", "deep", "deer", "desk", "dial", "dish", "dock", "door",
    "dose", "down", "draw", "drop", "drum", "dual", "duck", "dust", "duty", "each", "earn",
    "ease", "east", "easy", "edge", "else", "even", "ever", "exit", "face", "fact", "fair",
    "fall", "farm", "fast", "fate", "fear", "feed", "feel", "fern", "file", "fill", "film",
    "find", "fine", "fire", "firm", "fish", "flag", "flat", "flow", "folk", "food", "foot",
    "ford", "fork", "form", "fort", "four", "free", "frog", "fuel", "full", "fund", "gain",
    "game", "gate", "gear", "gift", "girl", "give", "glad", "goal", "gold", "golf", "good",
    "gray", "grew", "grid", "grow", "gulf", "hair", "half", "hall", "hand", "hang", "hard",
    "harm", "hawk", "head", "heat", "held", "help", "herb", "hero", "hide", "high", "hill",
    "hint", "hold", "hole", "home", "hood", "hook", "hope", "horn", "host", "hour", "huge",
    "hunt", "idea", "inch", "iron", "isle", "item", "jazz", "join", "jump", "june", "jury",
    "keen", "keep", "kept", "kind", "king", "kite", "knee", "knot", "lake", "lamp", "land",
    "lane", "last", "late", "lawn", "lead", "leaf", "lean", "left", "lens", "life", "lift",
    "like", "lime", "line", "link", "lion", "list", "live", "load", "loan", "lock", "loft",
    "long", "look", "lord", "loud", "love", "luck", "lung", "made", "mail", "main", "make",
    "mall", "many", "mark", "mask", "mass", "meal", "meet", "melt", "menu", "mild", "milk",
    "mill", "mind", "mine", "mint", "mist", "mode", "mood", "moon", "more", "moss", "most",
    "move", "much", "myth",
];
