uucore::bin!(uu_when);
