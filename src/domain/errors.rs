use custom_error::custom_error;

custom_error! {
///! Custom error for request data that cannot be turned into a domain value.
pub MalformedInput
    MissingField{message:String} = "{message}",
    InvalidEmail{message:String} = "{message}",
    InvalidStatus{status:String} = "Invalid status: {status}",
}
