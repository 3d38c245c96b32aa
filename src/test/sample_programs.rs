//! Shared sample programs for the lexer, parser and interpreter tests.

/// The canonical hello world. `(V)` is the frame pointer, stepped by `1*1`
/// (the integer 1); a callee finds its argument one frame up, zeroes its
/// frame to leave its body loop, and returns through `(R)`. `F_len`
/// measures an array by probing cells until the write wraps around to
/// cell 0.
pub const HELLO_WORLD: &str = r"(S);
(V) := V_a;

# ((array)) -> len
(F_len) := ((
	( (V) + 1*1 );
	(V) := (V) + 1*1;
	( (V) )(Array) := ( (V) )(0);

	# loop
	( (V) )(I) := 1;
	((
		( (V) )(Found_len);

		( (V) )(Temp1) := ( (V) )(Array)(0);
		( (V) )(Temp2) := ( (V) )(Array)( ( (V) )(I) );

		( (V) )(Array)(0) := 0;
		( (V) )(Array)( ( (V) )(I) ) := 1;
		( (V) )(Found_len) := ( (V) )(Array)(0) = 0;

		( (V) )(Array)(0) := ( (V) )(Temp1);
		( (V) )(Array)( ( (V) )(I) ) := ( (V) )(Temp2);

		( (V) )(I) := ( (V) )(I) + 1;
	));

	( (V) )(I) := ( (V) )(I) - 1;

	(R) := ( (V) )(I);
	( (V) ) := 0;
	(V) := (V) - 1*1;
));

# ((str))
(F_print_str) := ((
	( (V) + 1*1 );
	(V) := (V) + 1*1;
	( (V) )(Str) := ( (V) )(0);

	( (V) + 1*1 ) := (( ( (V) - 1*1 )(Str) ));
	(F_len);
	( (V) )(Len) := (R);

	# loop
	( (V) )(I) := 0;
	((
		( (V) )(I) < ( (V) )(Len);

		(std_output_char) := ( (V) )(Str)( ( (V) )(I) );
		(std_output);

		( (V) )(I) := ( (V) )(I) + 1;
	));

	( (V) ) := 0;
	(V) := (V) - 1*1;
));

# Hello world\n
( (V) + 1*1 ) := (( ((72; 101; 108; 108; 111; 32; 119; 111; 114; 108; 100; 33; 10)) ));
(F_print_str);

(S) := 0;
";

/// What the formatter (and the bracket-tree printers) make of
/// [`HELLO_WORLD`]. Identifiers come back canonically rotated
/// (`Temp1` is `1Temp`, `std_output` is `_outputstd`), integers as
/// `{numerator}{denominator}` coefficient lists.
pub const HELLO_WORLD_FORMATTED: &str = r"
( S )
( V ) := V_a
( F_len ) := ((
    ( ( V ) + {0 1}{1} * {0 1}{1} )
    ( V ) := ( V ) + {0 1}{1} * {0 1}{1}
    ( ( V ) )( Array ) := ( ( V ) )( {}{1} )
    ( ( V ) )( I ) := {0 1}{1}
    ((
        ( ( V ) )( Found_len )
        ( ( V ) )( 1Temp ) := ( ( V ) )( Array )( {}{1} )
        ( ( V ) )( 2Temp ) := ( ( V ) )( Array )( ( ( V ) )( I ) )
        ( ( V ) )( Array )( {}{1} ) := {}{1}
        ( ( V ) )( Array )( ( ( V ) )( I ) ) := {0 1}{1}
        ( ( V ) )( Found_len ) := ( ( V ) )( Array )( {}{1} ) = {}{1}
        ( ( V ) )( Array )( {}{1} ) := ( ( V ) )( 1Temp )
        ( ( V ) )( Array )( ( ( V ) )( I ) ) := ( ( V ) )( 2Temp )
        ( ( V ) )( I ) := ( ( V ) )( I ) + {0 1}{1}
    ))
    ( ( V ) )( I ) := ( ( V ) )( I ) - {0 1}{1}
    ( R ) := ( ( V ) )( I )
    ( ( V ) ) := {}{1}
    ( V ) := ( V ) - {0 1}{1} * {0 1}{1}
))
( F_print_str ) := ((
    ( ( V ) + {0 1}{1} * {0 1}{1} )
    ( V ) := ( V ) + {0 1}{1} * {0 1}{1}
    ( ( V ) )( Str ) := ( ( V ) )( {}{1} )
    ( ( V ) + {0 1}{1} * {0 1}{1} ) := ((
        ( ( V ) - {0 1}{1} * {0 1}{1} )( Str )
    ))
    ( F_len )
    ( ( V ) )( Len ) := ( R )
    ( ( V ) )( I ) := {}{1}
    ((
        ( ( V ) )( I ) < ( ( V ) )( Len )
        ( _charstd_output ) := ( ( V ) )( Str )( ( ( V ) )( I ) )
        ( _outputstd )
        ( ( V ) )( I ) := ( ( V ) )( I ) + {0 1}{1}
    ))
    ( ( V ) ) := {}{1}
    ( V ) := ( V ) - {0 1}{1} * {0 1}{1}
))
( ( V ) + {0 1}{1} * {0 1}{1} ) := ((
    ((
        {0 72}{1}
        {0 101}{1}
        {0 108}{1}
        {0 108}{1}
        {0 111}{1}
        {0 32}{1}
        {0 119}{1}
        {0 111}{1}
        {0 114}{1}
        {0 108}{1}
        {0 100}{1}
        {0 33}{1}
        {0 10}{1}
    ))
))
( F_print_str )
( S ) := {}{1}
";
